//! Mintguard Server - REST API for the near-duplicate image gate
//!
//! Endpoints:
//! - POST /hash   - Fingerprint an upload (dHash + SHA-256)
//! - POST /verify - Check an upload against the catalog
//! - GET  /health - Liveness
//! - GET  /ready  - Readiness (pings the catalog)

use std::net::SocketAddr;
use std::sync::Arc;

use mintguard_server::{create_router_with_state, AppState, Config, PostgresCatalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mintguard_server=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let state = match &config.database_url {
        Some(url) => {
            let catalog = PostgresCatalog::connect_lazy(
                url,
                config.database_max_connections,
                config.database_min_connections,
            )?;
            tracing::info!(
                max_connections = config.database_max_connections,
                "Catalog: PostgreSQL"
            );
            AppState::with_catalog(&config, Arc::new(catalog))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, matching against an empty in-memory catalog");
            AppState::in_memory(&config)
        }
    };

    let matcher = state.matcher.config();
    tracing::info!(
        threshold = matcher.threshold,
        candidate_limit = matcher.candidate_limit,
        max_results = matcher.max_results,
        budget_ms = matcher.budget.as_millis() as u64,
        "Gate configured"
    );

    let app = create_router_with_state(&config, state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Mintguard server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
