//! Error types for the catalog module.

use mintguard_core::GateError;
use thiserror::Error;

/// Errors that can occur when reading the artwork catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Database connection failed or the URL is invalid
    #[error("Database connection error: {0}")]
    Connection(String),

    /// SQL query execution failed
    #[error("Query error: {0}")]
    Query(String),
}

impl From<sqlx::Error> for CatalogError {
    fn from(e: sqlx::Error) -> Self {
        Self::Query(e.to_string())
    }
}

impl From<CatalogError> for GateError {
    fn from(e: CatalogError) -> Self {
        GateError::CorpusUnavailable(e.to_string())
    }
}
