//! Application state module
//!
//! Defines shared state accessible across all request handlers.

use std::sync::Arc;
use std::time::Duration;

use mintguard_core::{CorpusAccessor, MemoryCorpus, SimilarityMatcher};

use crate::catalog::PostgresCatalog;
use crate::config::Config;

/// Application state containing shared resources.
///
/// Nothing here is mutated by requests; each gate check is independent.
#[derive(Clone)]
pub struct AppState {
    /// Near-duplicate matcher over the configured catalog
    pub matcher: Arc<SimilarityMatcher>,
    /// Postgres catalog, when configured (used by readiness checks)
    pub catalog: Option<Arc<PostgresCatalog>>,
    /// Maximum accepted upload size in bytes
    pub max_file_size: usize,
    /// Time allowed for reading a gate upload
    pub upload_timeout: Duration,
}

impl AppState {
    /// State backed by the Postgres catalog.
    pub fn with_catalog(config: &Config, catalog: Arc<PostgresCatalog>) -> Self {
        let corpus: Arc<dyn CorpusAccessor> = catalog.clone();
        Self {
            matcher: Arc::new(SimilarityMatcher::new(corpus, config.matcher_config())),
            catalog: Some(catalog),
            max_file_size: config.max_file_size(),
            upload_timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// State backed by an arbitrary corpus (in-memory catalogs, tests).
    pub fn with_corpus(config: &Config, corpus: Arc<dyn CorpusAccessor>) -> Self {
        Self {
            matcher: Arc::new(SimilarityMatcher::new(corpus, config.matcher_config())),
            catalog: None,
            max_file_size: config.max_file_size(),
            upload_timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// State with an empty in-memory catalog (development without a database).
    pub fn in_memory(config: &Config) -> Self {
        Self::with_corpus(config, Arc::new(MemoryCorpus::default()))
    }
}
