//! OAuth redirect target and report page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::query::{AppParams, ResponseFormat};
use crate::api::dto::report::ReportResponse;
use crate::domain::entities::{AccountProfile, SnpLocation};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::rows::{MatchRow, VariantRow, match_rows, variant_rows};

/// Template for the report page.
#[derive(Template, WebTemplate)]
#[template(path = "app.html")]
pub struct AppTemplate {
    pub page_title: String,
    pub page_header: String,
    pub home_url: String,
    pub client_id: String,
    pub user_id: String,
    pub profiles: Vec<AccountProfile>,
    pub genotypes_json: String,
    pub query: String,
    pub variant_set_id: String,
    pub locations: Vec<SnpLocation>,
    pub variants: Vec<VariantRow>,
    pub matches: Vec<MatchRow>,
}

/// Handles the 23andMe redirect and renders the combined report.
///
/// # Endpoint
///
/// `GET /app/?code=...&state=...`
///
/// # Query Parameters
///
/// - `code`, `state` - authorization response (ignored while a token is cached)
/// - `reference_name`, `start`, `end`, `variant_set_id` - report window
/// - `format` - `html` (default) or `json`
///
/// # Errors
///
/// - 400 for invalid parameters or a forged `state`
/// - 401 without a code and cached token, or when 23andMe rejects the token
///   (the cached token is dropped so the next login starts fresh)
/// - 502 if either upstream API fails
pub async fn app_handler(
    State(state): State<AppState>,
    Query(params): Query<AppParams>,
) -> Result<Response, AppError> {
    params.validate()?;

    let token = state
        .auth_service
        .access_token(params.code.as_deref(), params.state.as_deref())
        .await?;
    let query = state.resolve_query(&params.region).await?;

    let report = match state.report_service.build_report(&token, query).await {
        Err(e) if e.is_unauthorized() => {
            state.auth_service.clear().await;
            return Err(e);
        }
        other => other?,
    };

    if params.format.unwrap_or_default() == ResponseFormat::Json {
        return Ok(Json(ReportResponse::from(report)).into_response());
    }

    let genotypes_json = serde_json::to_string_pretty(&report.genotypes.raw).map_err(|e| {
        AppError::internal("Failed to render genotypes", json!({ "reason": e.to_string() }))
    })?;
    let site = &state.site;

    Ok(AppTemplate {
        page_title: site.page_header.clone(),
        page_header: site.page_header.clone(),
        home_url: site.home_url.clone(),
        client_id: site.client_id.clone(),
        user_id: report.user.id.clone(),
        profiles: report.user.profiles.clone(),
        genotypes_json,
        query: report.query.region.to_string(),
        variant_set_id: report.query.variant_set_id.clone(),
        variants: variant_rows(&report.variants),
        matches: match_rows(&report.matches),
        locations: report.locations,
    }
    .into_response())
}
