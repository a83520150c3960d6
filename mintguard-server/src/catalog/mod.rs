//! Artwork catalog access.
//!
//! The catalog schema is owned by the marketplace backend. This module only
//! reads the recency-ordered slice of published artworks that carry a stored
//! fingerprint, and exposes it to the gate as a
//! [`mintguard_core::CorpusAccessor`].

pub mod error;
pub mod postgres;

pub use error::CatalogError;
pub use postgres::PostgresCatalog;
