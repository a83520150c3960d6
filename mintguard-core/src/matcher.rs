//! Similarity matcher: the moderation gate's orchestrator.
//!
//! Given an uploaded image, the matcher fingerprints it, pulls a bounded
//! candidate set from the corpus, scores every candidate and returns the best
//! matches above the configured threshold.
//!
//! The gate is advisory. Every failure degrades to a well-formed
//! [`MatchOutcome`] instead of an error:
//!
//! | Failure                      | Outcome                          |
//! |------------------------------|----------------------------------|
//! | image does not decode        | `query: None`, no matches        |
//! | corpus fetch fails           | `query: Some(..)`, no matches    |
//! | malformed stored fingerprint | that candidate scores 0          |
//! | budget elapses               | `query: None`, no matches        |

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::corpus::{CatalogEntry, CorpusAccessor};
use crate::distance::{score_from_distance, MAX_DISTANCE};
use crate::fingerprint::{Fingerprint, PerceptualHasher};

/// Minimum score for a candidate to be reported.
pub const DEFAULT_THRESHOLD: f64 = 0.86;

/// Maximum candidates pulled from the corpus per request.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 500;

/// Maximum matches returned per request.
pub const DEFAULT_MAX_RESULTS: usize = 12;

/// Wall-clock budget for one request.
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(12);

/// Matcher tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    /// Minimum score in `[0.0, 1.0]`; candidates scoring below it are dropped
    pub threshold: f64,
    /// Candidates fetched from the corpus
    pub candidate_limit: usize,
    /// Matches returned
    pub max_results: usize,
    /// Wall-clock budget for the whole pipeline
    pub budget: Duration,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            max_results: DEFAULT_MAX_RESULTS,
            budget: DEFAULT_BUDGET,
        }
    }
}

/// A catalog entry that resembles the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: Uuid,
    pub title: String,
    pub owner_id: String,
    pub image_url: String,
    /// `1 - distance / 64`
    pub score: f64,
    /// Hamming distance to the query
    pub distance: u32,
}

/// Result of one gate check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Query fingerprint, absent when it could not be computed in time
    pub query: Option<Fingerprint>,
    /// Matches sorted by descending score
    pub matches: Vec<MatchResult>,
}

impl MatchOutcome {
    /// `{ query: null, matches: [] }`
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Near-duplicate matcher over a candidate corpus.
#[derive(Clone)]
pub struct SimilarityMatcher {
    corpus: Arc<dyn CorpusAccessor>,
    hasher: PerceptualHasher,
    config: MatcherConfig,
}

impl SimilarityMatcher {
    pub fn new(corpus: Arc<dyn CorpusAccessor>, config: MatcherConfig) -> Self {
        Self {
            corpus,
            hasher: PerceptualHasher::default(),
            config,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Run the gate for one uploaded image.
    ///
    /// Never fails. The pipeline races the configured budget inside a single
    /// timed future, so exactly one outcome is produced: either the pipeline's
    /// or the empty one. A pipeline that loses the race is dropped.
    pub async fn find_matches(&self, image: Vec<u8>) -> MatchOutcome {
        match tokio::time::timeout(self.config.budget, self.run(image)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    budget_ms = self.config.budget.as_millis() as u64,
                    "Similarity check exceeded its budget"
                );
                MatchOutcome::empty()
            }
        }
    }

    async fn run(&self, image: Vec<u8>) -> MatchOutcome {
        let hasher = self.hasher;
        let bytes = image.len();

        // Decoding is CPU-bound; keep it off the async workers
        let query = match tokio::task::spawn_blocking(move || hasher.hash_bytes(&image)).await {
            Ok(Ok(fingerprint)) => fingerprint,
            Ok(Err(e)) => {
                debug!(bytes, error = %e, "Query image did not decode");
                return MatchOutcome::empty();
            }
            Err(e) => {
                warn!(error = %e, "Fingerprint task failed");
                return MatchOutcome::empty();
            }
        };

        let candidates = match self
            .corpus
            .fetch_candidates(self.config.candidate_limit)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(query = %query, error = %e, "Candidate corpus unavailable");
                return MatchOutcome {
                    query: Some(query),
                    matches: Vec::new(),
                };
            }
        };

        let scanned = candidates.len();
        let matches = rank(
            query,
            candidates.into_iter().take(self.config.candidate_limit),
            self.config.threshold,
            self.config.max_results,
        );

        debug!(query = %query, scanned, matched = matches.len(), "Similarity scan complete");

        MatchOutcome {
            query: Some(query),
            matches,
        }
    }
}

/// Score candidates against `query`, keep those at or above `threshold`, and
/// return at most `max_results` of them by descending score.
///
/// Ties keep their input order.
pub fn rank(
    query: Fingerprint,
    candidates: impl IntoIterator<Item = CatalogEntry>,
    threshold: f64,
    max_results: usize,
) -> Vec<MatchResult> {
    let mut matches: Vec<MatchResult> = candidates
        .into_iter()
        .filter_map(|entry| {
            let distance = match entry.fingerprint.as_deref().map(Fingerprint::from_hex) {
                Some(Ok(stored)) => query.distance(stored),
                _ => {
                    debug!(id = %entry.id, "Candidate has no usable fingerprint");
                    MAX_DISTANCE
                }
            };

            let score = score_from_distance(distance);
            (score >= threshold).then(|| MatchResult {
                id: entry.id,
                title: entry.title,
                owner_id: entry.owner_id,
                image_url: entry.image_url,
                score,
                distance,
            })
        })
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches.truncate(max_results);
    matches
}
