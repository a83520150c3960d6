//! HTTP request handlers
//!
//! This module contains all the request handlers for the API endpoints.

pub mod hash;
pub mod health;
pub mod verify;

pub use crate::state::AppState;
pub use hash::{hash_handler, HashResponse};
pub use health::{health, ready, HealthResponse, ReadyResponse};
pub use verify::{verify_handler, MatchItem, VerifyResponse};
