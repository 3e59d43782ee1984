//! Landing page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::state::AppState;

/// Template for the landing page.
///
/// Renders `templates/index.html` with a "Connect with 23andMe" link and a
/// link to the demo page.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page_title: String,
    pub page_header: String,
    pub auth_url: String,
    pub client_id: String,
    pub demo_url: String,
}

/// Renders the landing page.
///
/// # Endpoint
///
/// `GET /`
///
/// Every request issues a fresh signed `state`, so the authorization URL
/// differs between page loads.
pub async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request = state.auth_service.begin_authorization();
    let site = &state.site;

    IndexTemplate {
        page_title: site.page_header.clone(),
        page_header: site.page_header.clone(),
        auth_url: request.url,
        client_id: site.client_id.clone(),
        demo_url: site.demo_url.clone(),
    }
}
