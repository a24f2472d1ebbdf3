//! Error types for the catalog crate.
//!
//! Every failure here happens at the dataset boundary, before any index
//! is built. A catalog that made it out of this crate is guaranteed to
//! have the required columns and non-null text fields.

use thiserror::Error;

/// Errors that can occur while loading and normalizing a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error occurred while reading the dataset file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader rejected the input (bad quoting, ragged rows, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required canonical column is missing after header normalization
    ///
    /// `found` lists the normalized header names that were present, so the
    /// caller can tell which source column should have been renamed.
    #[error("Required column '{column}' missing from dataset (found columns: {found:?})")]
    Schema { column: String, found: Vec<String> },

    /// No usable rows were left after normalization
    #[error("Catalog is empty")]
    EmptyCatalog,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
