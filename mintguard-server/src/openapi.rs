//! OpenAPI documentation configuration
//!
//! Generates the OpenAPI 3.0 document for the Mintguard gate API.

use utoipa::OpenApi;

use crate::handlers::{HashResponse, HealthResponse, MatchItem, ReadyResponse, VerifyResponse};

/// Mintguard Gate API - OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mintguard - Gate API",
        version = "0.1.0",
        description = r#"
## Near-Duplicate Image Gate

Mintguard flags uploads that look like artworks already in the catalog.

- **Fingerprint** an upload via `POST /hash` (64-bit dHash plus SHA-256)
- **Check** an upload against the catalog via `POST /verify`

Matches score `1 - hamming / 64` and are returned when the score reaches the
configured threshold (0.86 by default). The check is a soft gate: it always
answers 200 within its time budget, with an empty result when it cannot decide.
"#,
        license(name = "MIT OR Apache-2.0")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    tags(
        (name = "Fingerprint", description = "Compute perceptual and content hashes for uploads"),
        (name = "Gate", description = "Check uploads for near-duplicates in the catalog"),
        (name = "Health", description = "Service health and readiness endpoints")
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::health::ready,
        crate::handlers::hash::hash_handler,
        crate::handlers::verify::verify_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ReadyResponse,
            HashResponse,
            VerifyResponse,
            MatchItem,
        )
    )
)]
pub struct ApiDoc;
