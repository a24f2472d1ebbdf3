//! Dense pairwise cosine similarity.
//!
//! The vectors are already unit length, so cosine similarity is the dot
//! product. Products are only formed for documents that share a term: each
//! row walks its own terms in ascending id and accumulates through the
//! term's postings list. Cell `(i, j)` and `(j, i)` therefore sum the same
//! products in the same order and come out bit-identical.

use crate::vectorizer::SparseVector;
use rayon::prelude::*;

/// Row-major `n x n` similarity matrix with entries in `[0.0, 1.0]`
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute all pairwise similarities of `vectors`
    pub fn compute(vectors: &[SparseVector]) -> Self {
        let n = vectors.len();

        // Postings per term: (document, weight), documents ascending
        let term_count = vectors
            .iter()
            .filter_map(|v| v.last().map(|(t, _)| *t as usize + 1))
            .max()
            .unwrap_or(0);
        let mut postings: Vec<Vec<(usize, f64)>> = vec![Vec::new(); term_count];
        for (doc, vector) in vectors.iter().enumerate() {
            for &(term, weight) in vector {
                postings[term as usize].push((doc, weight));
            }
        }

        let mut values = vec![0.0f64; n * n];
        if n > 0 {
            values
                .par_chunks_mut(n)
                .enumerate()
                .for_each(|(i, row)| {
                    for &(term, wi) in &vectors[i] {
                        for &(j, wj) in &postings[term as usize] {
                            row[j] += wi * wj;
                        }
                    }
                    for value in row.iter_mut() {
                        *value = value.clamp(0.0, 1.0);
                    }
                    // Rounding can leave the self-similarity a hair off 1.0
                    row[i] = if vectors[i].is_empty() { 0.0 } else { 1.0 };
                });
        }

        Self { n, values }
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.values[i * self.n + j])
        } else {
            None
        }
    }

    /// Similarities of item `i` to every item, indexed by position
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.n {
            Some(&self.values[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }

    /// Approximate heap footprint in bytes
    pub fn memory_bytes(&self) -> usize {
        self.values.len() * std::mem::size_of::<f64>()
    }
}
