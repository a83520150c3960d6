//! MintGuard Core - near-duplicate detection for the mint moderation gate
//!
//! This crate fingerprints uploaded artwork and compares it against the
//! fingerprints of previously published pieces, so a human reviewer can see
//! likely duplicates before a mint goes through.
//!
//! # Features
//!
//! - 64-bit difference hash (dHash) robust to re-encoding and resizing
//! - SHA-256 content digests for exact-duplicate checks
//! - Hamming-distance scoring that tolerates dirty stored data
//! - A bounded, time-boxed matcher that never fails its caller
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mintguard_core::{MatcherConfig, MemoryCorpus, SimilarityMatcher};
//!
//! # async fn example() {
//! let corpus = Arc::new(MemoryCorpus::default());
//! let matcher = SimilarityMatcher::new(corpus, MatcherConfig::default());
//!
//! let upload = std::fs::read("artwork.png").unwrap();
//! let outcome = matcher.find_matches(upload).await;
//! for m in &outcome.matches {
//!     println!("{} ({:.2})", m.title, m.score);
//! }
//! # }
//! ```

pub mod corpus;
pub mod digest;
pub mod distance;
pub mod error;
pub mod fingerprint;
#[cfg(feature = "perceptual-hash")]
pub mod matcher;

pub use corpus::{CatalogEntry, CorpusAccessor, Listing, MemoryCorpus};
pub use digest::{digest, ContentDigest};
pub use distance::{hamming_distance, score_from_distance, similarity, MAX_DISTANCE};
pub use error::{GateError, Result};
pub use fingerprint::{Fingerprint, FINGERPRINT_BITS, FINGERPRINT_HEX_LEN};

#[cfg(feature = "perceptual-hash")]
pub use fingerprint::{encode, PerceptualHasher};

#[cfg(feature = "perceptual-hash")]
pub use matcher::{
    rank, MatchOutcome, MatchResult, MatcherConfig, SimilarityMatcher, DEFAULT_BUDGET,
    DEFAULT_CANDIDATE_LIMIT, DEFAULT_MAX_RESULTS, DEFAULT_THRESHOLD,
};
