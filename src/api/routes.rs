//! JSON API route configuration.

use axum::{Router, routing::get};

use crate::api::handlers::{health_handler, search_variants_handler};
use crate::state::AppState;

/// JSON endpoints.
///
/// # Endpoints
///
/// - `GET /variants/search` - GA4GH variants annotated with 23andMe data
/// - `GET /health`          - Liveness and component checks
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/variants/search", get(search_variants_handler))
        .route("/health", get(health_handler))
}
