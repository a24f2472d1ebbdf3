//! Content similarity index for a movie catalog.
//!
//! Builds a TF-IDF vector space over each item's genre, overview, director
//! and cast, then precomputes the full cosine similarity matrix so queries
//! are a single row read.
//!
//! # Example
//!
//! ```no_run
//! use catalog::{Catalog, Columns, Item};
//! use similarity::SimilarityIndex;
//!
//! let catalog = Catalog::from_items(
//!     vec![
//!         Item::new("A", "action", "hero fights villain"),
//!         Item::new("B", "action", "hero battles villain"),
//!     ],
//!     Columns::required_only(),
//! );
//! let index = SimilarityIndex::build(catalog)?;
//! println!("sim(A, B) = {:?}", index.similarity(0, 1));
//! # Ok::<(), similarity::IndexError>(())
//! ```

pub mod error;
pub mod index;
pub mod matrix;
pub mod stopwords;
pub mod title_index;
pub mod tokenizer;
pub mod vectorizer;

pub use error::{IndexError, Result};
pub use index::{DisplayFields, IndexStats, SimilarityIndex};
pub use matrix::SimilarityMatrix;
pub use stopwords::{ENGLISH_STOP_WORDS, StopWords};
pub use title_index::TitleIndex;
pub use tokenizer::{DEFAULT_TOKEN_PATTERN, Tokenizer};
pub use vectorizer::{SparseVector, TermId, TermVectorSpace, VectorizerConfig};
