//! Error types for building a similarity index.

use thiserror::Error;

/// Errors that abort an index build. No partial index survives any of them.
#[derive(Error, Debug)]
pub enum IndexError {
    /// Build invoked with zero items; a 0x0 matrix is not a usable index
    #[error("Cannot build a similarity index from an empty catalog")]
    EmptyCatalog,

    /// A custom token pattern did not compile
    #[error("Invalid token pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, IndexError>;
