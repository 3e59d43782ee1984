//! Browser-facing route configuration.

use axum::{Router, routing::get};

use crate::state::AppState;
use crate::web::handlers::{app_handler, demo_handler, index_handler};

/// HTML pages.
///
/// # Endpoints
///
/// - `GET /`     - Landing page with the 23andMe authorization link
/// - `GET /app`  - OAuth redirect target rendering the report
/// - `GET /demo` - Report without a 23andMe login
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/app", get(app_handler))
        .route("/demo", get(demo_handler))
}
