//! API route definitions
//!
//! Organizes endpoints for the EchoCold dashboard:
//! - /api/v1/status - system status and counters
//! - /api/v1/devices - live per-device classification snapshots
//! - /api/v1/profiles - the compressor profile registry
//! - /api/v1/history/:device_id - annotated raw sample history

use axum::routing::get;
use axum::Router;

use super::handlers::{self, ApiState};

/// Create all API routes for the dashboard.
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/status", get(handlers::get_status))
        .route("/devices", get(handlers::get_devices))
        .route("/profiles", get(handlers::get_profiles))
        .route("/history/:device_id", get(handlers::get_history))
        .with_state(state)
}

/// Root-level routes kept for pre-v1 dashboard compatibility.
pub fn legacy_routes(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::legacy_health_check))
        .route("/history/:device_id", get(handlers::get_history))
        .with_state(state)
}
