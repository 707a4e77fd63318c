//! REST API module using Axum
//!
//! Provides HTTP endpoints for the EchoCold dashboard:
//! - /api/v1 routes (status, devices, profiles, annotated history)
//! - legacy root routes (`/health`, `/history/:device_id`) for the
//!   pre-v1 dashboard

pub mod handlers;
mod routes;

pub use handlers::ApiState;

use axum::http::Method;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the CORS layer.
///
/// The dashboard is served from arbitrary origins (kiosk tablets, local
/// dev servers), so all origins are allowed for the read-only API.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

/// Create the complete application router.
pub fn create_app(state: ApiState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes(state.clone()))
        .merge(routes::legacy_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(build_cors_layer())
}
