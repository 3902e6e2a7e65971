//! Catalog error taxonomy.

use thiserror::Error;

use crate::validation::InvalidFields;

/// Errors produced by catalog storage operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Input was missing or malformed; the violated field set is attached.
    #[error("{0}")]
    Validation(InvalidFields),

    /// No food with the requested ID exists.
    #[error("food not found")]
    NotFound,

    /// The underlying database failed.
    #[error("catalog store unavailable: {0}")]
    Store(#[from] sqlx::Error),

    /// A persisted value could not be interpreted.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl From<InvalidFields> for CatalogError {
    fn from(invalid: InvalidFields) -> Self {
        Self::Validation(invalid)
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
