//! Top-level router configuration combining page and API routes.
//!
//! # Route Structure
//!
//! - `GET /`                 - Landing page with the authorization link
//! - `GET /app/`             - OAuth redirect target and report
//! - `GET /demo/`            - Report without a 23andMe login
//! - `GET /variants/search/` - Annotated GA4GH variant search (JSON)
//! - `GET /health`           - Health check (JSON)
//! - `/static/*`             - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling, so `/app/` and `/app`
//!   reach the same handler

use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;

/// Builds the router with all routes and the tracing layer, without path
/// normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(web::routes::page_routes())
        .merge(api::routes::api_routes())
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
