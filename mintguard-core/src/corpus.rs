//! Candidate corpus access.
//!
//! The catalog of published artworks is owned by an external service. The gate
//! only needs a bounded, recency-ordered snapshot of the entries that carry a
//! stored fingerprint, which is what [`CorpusAccessor`] provides.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// One published artwork as seen by the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub title: String,
    /// Owner identifier (user id or wallet address, opaque to the gate)
    pub owner_id: String,
    /// Display image URL
    pub image_url: String,
    /// Stored fingerprint exactly as persisted. It may be malformed.
    pub fingerprint: Option<String>,
}

/// Source of comparison candidates.
///
/// Implementations must be thread-safe (`Send + Sync`) and read-only from the
/// gate's point of view.
#[async_trait]
pub trait CorpusAccessor: Send + Sync {
    /// Fetch at most `limit` published entries with a non-null fingerprint,
    /// newest first.
    ///
    /// Failures should be reported as [`crate::GateError::CorpusUnavailable`].
    async fn fetch_candidates(&self, limit: usize) -> Result<Vec<CatalogEntry>>;
}

/// A catalog row with the lifecycle fields the accessor filters on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    #[serde(default = "default_published")]
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

fn default_published() -> bool {
    true
}

/// Catalog snapshot held in memory.
///
/// Used by the CLI for JSON catalog exports, by the server when no database is
/// configured, and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    listings: Vec<Listing>,
}

impl MemoryCorpus {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// Load a JSON array of listings.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[async_trait]
impl CorpusAccessor for MemoryCorpus {
    async fn fetch_candidates(&self, limit: usize) -> Result<Vec<CatalogEntry>> {
        let mut eligible: Vec<&Listing> = self
            .listings
            .iter()
            .filter(|l| l.published && l.entry.fingerprint.is_some())
            .collect();

        // Stable sort keeps insertion order among equal timestamps
        eligible.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(eligible
            .into_iter()
            .take(limit)
            .map(|l| l.entry.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn listing(title: &str, fingerprint: Option<&str>, published: bool, ts: i64) -> Listing {
        Listing {
            entry: CatalogEntry {
                id: Uuid::new_v4(),
                title: title.to_string(),
                owner_id: "owner".to_string(),
                image_url: format!("https://cdn.example/{}.png", title),
                fingerprint: fingerprint.map(str::to_string),
            },
            published,
            created_at: Utc.timestamp_opt(ts, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_filters_and_orders_newest_first() {
        let corpus = MemoryCorpus::new(vec![
            listing("old", Some("0000000000000000"), true, 100),
            listing("draft", Some("0000000000000001"), false, 500),
            listing("unhashed", None, true, 400),
            listing("new", Some("0000000000000002"), true, 300),
        ]);

        let titles: Vec<String> = corpus
            .fetch_candidates(10)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();

        assert_eq!(titles, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_respects_limit() {
        let corpus = MemoryCorpus::new(
            (0..20)
                .map(|i| listing(&format!("a{i}"), Some("0000000000000000"), true, i))
                .collect(),
        );

        let entries = corpus.fetch_candidates(5).await.unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].title, "a19");
        assert!(corpus.fetch_candidates(0).await.unwrap().is_empty());
    }

    #[test]
    fn test_from_json_defaults_published() {
        let json = r#"[{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "title": "Sunset",
            "owner_id": "0xabc",
            "image_url": "https://cdn.example/sunset.png",
            "fingerprint": "deadbeefcafebabe",
            "created_at": "2026-01-08T10:00:00Z"
        }]"#;

        let corpus = MemoryCorpus::from_json(json).unwrap();
        assert_eq!(corpus.len(), 1);
        assert!(corpus.listings[0].published);
        assert_eq!(corpus.listings[0].entry.title, "Sunset");
    }
}
