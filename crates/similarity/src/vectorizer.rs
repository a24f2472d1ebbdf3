//! TF-IDF vector space.
//!
//! Builds a fixed vocabulary from a set of documents, weights each term by a
//! smoothed inverse document frequency and turns every document into an
//! L2-normalized sparse vector.

use crate::error::Result;
use crate::stopwords::StopWords;
use crate::tokenizer::{DEFAULT_TOKEN_PATTERN, Tokenizer};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Term identifier: index into the sorted vocabulary
pub type TermId = u32;

/// Sparse vector as `(term, weight)` pairs sorted by term id
pub type SparseVector = Vec<(TermId, f64)>;

/// Vectorizer settings. Defaults give English stop words, tokens of two or
/// more word characters and raw term counts.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorizerConfig {
    pub stop_words: StopWords,
    pub token_pattern: String,
    pub sublinear_tf: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            stop_words: StopWords::English,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            sublinear_tf: false,
        }
    }
}

impl VectorizerConfig {
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn with_token_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.token_pattern = pattern.into();
        self
    }

    /// Use `1 + ln(tf)` instead of the raw count
    pub fn with_sublinear_tf(mut self, sublinear: bool) -> Self {
        self.sublinear_tf = sublinear;
        self
    }
}

/// Vocabulary, IDF weights and one normalized vector per document
#[derive(Debug, Clone)]
pub struct TermVectorSpace {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

impl TermVectorSpace {
    /// Fit the space on `documents`; document `i` becomes vector `i`
    pub fn fit<S>(documents: &[S], config: &VectorizerConfig) -> Result<Self>
    where
        S: AsRef<str> + Sync,
    {
        let tokenizer = Tokenizer::new(&config.token_pattern, &config.stop_words)?;

        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| tokenizer.tokenize(doc.as_ref()))
            .collect();

        let vocabulary: Vec<String> = tokenized
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let term_ids: HashMap<&str, TermId> = vocabulary
            .iter()
            .enumerate()
            .map(|(id, term)| (term.as_str(), id as TermId))
            .collect();

        // Raw counts per document, ordered by term id
        let counts: Vec<BTreeMap<TermId, u32>> = tokenized
            .par_iter()
            .map(|tokens| {
                let mut doc = BTreeMap::new();
                for token in tokens {
                    if let Some(&id) = term_ids.get(token.as_str()) {
                        *doc.entry(id).or_insert(0) += 1;
                    }
                }
                doc
            })
            .collect();

        let mut df = vec![0u32; vocabulary.len()];
        for doc in &counts {
            for &id in doc.keys() {
                df[id as usize] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let sublinear = config.sublinear_tf;
        let vectors: Vec<SparseVector> = counts
            .par_iter()
            .map(|doc| {
                let mut vector: SparseVector = doc
                    .iter()
                    .map(|(&id, &count)| {
                        let tf = if sublinear {
                            1.0 + (count as f64).ln()
                        } else {
                            count as f64
                        };
                        (id, tf * idf[id as usize])
                    })
                    .collect();
                l2_normalize(&mut vector);
                vector
            })
            .collect();

        debug!(
            "Vectorized {} documents, vocabulary size {}",
            documents.len(),
            vocabulary.len()
        );

        Ok(Self {
            vocabulary,
            idf,
            vectors,
        })
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    pub fn vector(&self, doc: usize) -> Option<&SparseVector> {
        self.vectors.get(doc)
    }

    pub fn term(&self, id: TermId) -> Option<&str> {
        self.vocabulary.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Number of stored non-zero weights across all documents
    pub fn nnz(&self) -> usize {
        self.vectors.iter().map(Vec::len).sum()
    }
}

fn l2_normalize(vector: &mut SparseVector) {
    let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in vector.iter_mut() {
            *w /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(v: &SparseVector) -> f64 {
        v.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let docs = ["zebra apple", "mango apple"];
        let space = TermVectorSpace::fit(&docs, &VectorizerConfig::default()).unwrap();
        assert_eq!(space.vocabulary(), &["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_smoothed_idf() {
        let docs = ["apple mango", "apple"];
        let space = TermVectorSpace::fit(&docs, &VectorizerConfig::default()).unwrap();

        // apple in both docs: ln(3/3) + 1
        assert!((space.idf()[0] - 1.0).abs() < 1e-12);
        // mango in one doc: ln(3/2) + 1
        assert!((space.idf()[1] - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let docs = ["action hero villain", "romance love love paris"];
        let space = TermVectorSpace::fit(&docs, &VectorizerConfig::default()).unwrap();
        for v in space.vectors() {
            assert!((norm(v) - 1.0).abs() < 1e-12);
            assert!(v.windows(2).all(|w| w[0].0 < w[1].0));
        }
    }

    #[test]
    fn test_stop_word_only_document_is_zero_vector() {
        let docs = ["the and of", "hero"];
        let space = TermVectorSpace::fit(&docs, &VectorizerConfig::default()).unwrap();
        assert!(space.vector(0).unwrap().is_empty());
        assert_eq!(space.vocabulary(), &["hero"]);
    }

    #[test]
    fn test_raw_counts_weight_repeated_terms() {
        let docs = ["love love paris"];
        let config = VectorizerConfig::default().with_stop_words(StopWords::None);
        let space = TermVectorSpace::fit(&docs, &config).unwrap();

        let v = space.vector(0).unwrap();
        // Single document: both idf are 1, weights 2 and 1 before normalizing
        assert!((v[0].1 / v[1].1 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sublinear_tf() {
        let docs = ["love love paris"];
        let config = VectorizerConfig::default().with_sublinear_tf(true);
        let space = TermVectorSpace::fit(&docs, &config).unwrap();

        let v = space.vector(0).unwrap();
        let expected = 1.0 + 2.0f64.ln();
        assert!((v[0].1 / v[1].1 - expected).abs() < 1e-12);
    }

    #[test]
    fn test_custom_token_pattern() {
        let docs = ["a b cc"];
        let config = VectorizerConfig::default()
            .with_stop_words(StopWords::None)
            .with_token_pattern(r"\b\w+\b");
        let space = TermVectorSpace::fit(&docs, &config).unwrap();
        assert_eq!(space.vocabulary(), &["a", "b", "cc"]);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let docs = ["crime drama boss", "crime thriller heist", "drama family"];
        let a = TermVectorSpace::fit(&docs, &VectorizerConfig::default()).unwrap();
        let b = TermVectorSpace::fit(&docs, &VectorizerConfig::default()).unwrap();
        assert_eq!(a.vocabulary(), b.vocabulary());
        assert_eq!(a.vectors(), b.vectors());
    }
}
