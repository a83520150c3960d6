//! PostgreSQL implementation of the candidate corpus.

use std::time::Duration;

use async_trait::async_trait;
use mintguard_core::{CatalogEntry, CorpusAccessor};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::CatalogError;

/// Published artworks with a fingerprint, newest first.
const CANDIDATES_SQL: &str = r#"
    SELECT id, COALESCE(title, '') AS title, owner_id, COALESCE(image_url, '') AS image_url, dhash64
    FROM artworks
    WHERE published = TRUE AND dhash64 IS NOT NULL
    ORDER BY created_at DESC
    LIMIT $1
"#;

/// PostgreSQL-backed catalog reader.
#[derive(Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

/// Row type for candidate queries.
#[derive(FromRow)]
struct ArtworkRow {
    id: Uuid,
    title: String,
    owner_id: String,
    image_url: String,
    dhash64: Option<String>,
}

impl From<ArtworkRow> for CatalogEntry {
    fn from(row: ArtworkRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            owner_id: row.owner_id,
            image_url: row.image_url,
            fingerprint: row.dhash64,
        }
    }
}

impl PostgresCatalog {
    /// Create a catalog reader for the given database URL.
    ///
    /// Connections are opened lazily, so the server starts even while the
    /// database is down; the gate then degrades to empty results and `/ready`
    /// reports the outage.
    pub fn connect_lazy(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy(database_url)
            .map_err(|e| CatalogError::Connection(e.to_string()))?;

        tracing::info!(max_connections, min_connections, "Catalog pool configured");

        Ok(Self { pool })
    }

    /// Create a catalog reader from an existing pool (for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check that the catalog database answers.
    pub async fn ping(&self) -> Result<(), CatalogError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CorpusAccessor for PostgresCatalog {
    async fn fetch_candidates(&self, limit: usize) -> mintguard_core::Result<Vec<CatalogEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows: Vec<ArtworkRow> = sqlx::query_as(CANDIDATES_SQL)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(CatalogError::from)?;

        tracing::debug!(rows = rows.len(), limit, "Fetched catalog candidates");

        Ok(rows.into_iter().map(CatalogEntry::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_maps_to_entry() {
        let id = Uuid::new_v4();
        let entry = CatalogEntry::from(ArtworkRow {
            id,
            title: "Sunset".to_string(),
            owner_id: "0xabc".to_string(),
            image_url: "https://cdn.example/sunset.png".to_string(),
            dhash64: Some("deadbeefcafebabe".to_string()),
        });

        assert_eq!(entry.id, id);
        assert_eq!(entry.title, "Sunset");
        assert_eq!(entry.fingerprint.as_deref(), Some("deadbeefcafebabe"));
    }

    #[test]
    fn test_candidate_query_is_bounded_and_filtered() {
        assert!(CANDIDATES_SQL.contains("LIMIT $1"));
        assert!(CANDIDATES_SQL.contains("dhash64 IS NOT NULL"));
        assert!(CANDIDATES_SQL.contains("ORDER BY created_at DESC"));
    }

    #[test]
    fn test_connect_lazy_rejects_invalid_url() {
        assert!(matches!(
            PostgresCatalog::connect_lazy("not a url", 2, 0),
            Err(CatalogError::Connection(_))
        ));
    }
}
