//! Health check handlers
//!
//! Provides health and readiness endpoints for monitoring and orchestration.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::state::AppState;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "healthy")]
    pub status: &'static str,
    /// Server version from Cargo.toml
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    /// Catalog backend: "postgres" or "memory"
    #[schema(example = "postgres")]
    pub catalog: &'static str,
    /// Service name
    #[schema(example = "mintguard-server")]
    pub service: &'static str,
}

/// GET /health - Health check endpoint
///
/// Liveness only: does not touch the catalog.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        catalog: if state.catalog.is_some() {
            "postgres"
        } else {
            "memory"
        },
        service: "mintguard-server",
    })
}

/// Readiness response for Kubernetes
#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Whether the service is ready to accept traffic
    pub ready: bool,
    /// Optional message explaining status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// GET /ready - Readiness probe
///
/// Returns 200 when the catalog answers (or no catalog is configured),
/// 503 otherwise.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Ready to accept traffic", body = ReadyResponse),
        (status = 503, description = "Catalog unreachable")
    )
)]
pub async fn ready(State(state): State<AppState>) -> Result<Json<ReadyResponse>, ApiError> {
    match &state.catalog {
        Some(catalog) => {
            catalog.ping().await?;
            Ok(Json(ReadyResponse {
                ready: true,
                message: None,
            }))
        }
        None => Ok(Json(ReadyResponse {
            ready: true,
            message: Some("no catalog configured; matching against an empty corpus"),
        })),
    }
}
