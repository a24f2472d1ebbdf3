//! The artifact bundle queries read from.

use crate::error::{IndexError, Result};
use crate::matrix::SimilarityMatrix;
use crate::title_index::TitleIndex;
use crate::vectorizer::{TermVectorSpace, VectorizerConfig};
use catalog::{Catalog, Columns, Position};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

/// Optional fields a recommendation row may show, fixed at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayFields {
    pub year: bool,
    pub genre: bool,
    pub director: bool,
}

impl From<Columns> for DisplayFields {
    fn from(columns: Columns) -> Self {
        Self {
            year: columns.year,
            genre: columns.genre,
            director: columns.director,
        }
    }
}

/// Summary numbers for logs and the CLI
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndexStats {
    pub items: usize,
    pub distinct_titles: usize,
    pub vocabulary: usize,
    pub nonzero_weights: usize,
    pub zero_vectors: usize,
    pub matrix_bytes: usize,
}

/// Catalog, vector space, similarity matrix and title index built together.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    catalog: Arc<Catalog>,
    space: TermVectorSpace,
    matrix: SimilarityMatrix,
    titles: TitleIndex,
    display: DisplayFields,
}

impl SimilarityIndex {
    /// Build with the default vectorizer settings
    pub fn build(catalog: impl Into<Arc<Catalog>>) -> Result<Self> {
        Self::build_with(catalog, &VectorizerConfig::default())
    }

    #[instrument(skip_all)]
    pub fn build_with(
        catalog: impl Into<Arc<Catalog>>,
        config: &VectorizerConfig,
    ) -> Result<Self> {
        let catalog: Arc<Catalog> = catalog.into();
        if catalog.is_empty() {
            return Err(IndexError::EmptyCatalog);
        }

        let start = Instant::now();

        let documents: Vec<String> = catalog
            .items()
            .par_iter()
            .map(|item| item.composite_text())
            .collect();
        let space = TermVectorSpace::fit(documents.as_slice(), config)?;
        let vectorized = start.elapsed();

        let matrix = SimilarityMatrix::compute(space.vectors());
        let titles = TitleIndex::build(&catalog);
        let display = DisplayFields::from(catalog.columns());

        info!(
            "Built similarity index: {} items, {} terms in {:?} (vectorize {:?})",
            catalog.len(),
            space.vocabulary().len(),
            start.elapsed(),
            vectorized
        );

        Ok(Self {
            catalog,
            space,
            matrix,
            titles,
            display,
        })
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn space(&self) -> &TermVectorSpace {
        &self.space
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn titles(&self) -> &TitleIndex {
        &self.titles
    }

    pub fn display(&self) -> DisplayFields {
        self.display
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Similarity between two positions
    pub fn similarity(&self, a: Position, b: Position) -> Option<f64> {
        self.matrix.get(a, b)
    }

    /// Terms two items share, with the product of their weights, largest first
    pub fn shared_terms(&self, a: Position, b: Position) -> Vec<(&str, f64)> {
        let (Some(va), Some(vb)) = (self.space.vector(a), self.space.vector(b)) else {
            return Vec::new();
        };

        let mut shared = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < va.len() && j < vb.len() {
            let (ta, wa) = va[i];
            let (tb, wb) = vb[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    if let Some(term) = self.space.term(ta) {
                        shared.push((term, wa * wb));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        shared.sort_by(|x, y| y.1.total_cmp(&x.1));
        shared
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            items: self.catalog.len(),
            distinct_titles: self.titles.len(),
            vocabulary: self.space.vocabulary().len(),
            nonzero_weights: self.space.nnz(),
            zero_vectors: self.space.vectors().iter().filter(|v| v.is_empty()).count(),
            matrix_bytes: self.matrix.memory_bytes(),
        }
    }
}
