//! Demo page that works without a 23andMe login.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::api::dto::query::{DemoParams, ResponseFormat};
use crate::domain::entities::SnpLocation;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::rows::{VariantRow, variant_rows};

#[derive(Template, WebTemplate)]
#[template(path = "demo.html")]
pub struct DemoTemplate {
    pub page_title: String,
    pub page_header: String,
    pub home_url: String,
    pub query: String,
    pub variant_set_id: String,
    pub locations: Vec<SnpLocation>,
    pub variants: Vec<VariantRow>,
}

/// Renders GA4GH variants and catalog SNPs for the configured window.
///
/// # Endpoint
///
/// `GET /demo/`
///
/// Accepts the same region parameters and `format` as `/app/`.
pub async fn demo_handler(
    State(state): State<AppState>,
    Query(params): Query<DemoParams>,
) -> Result<Response, AppError> {
    params.validate()?;

    let query = state.resolve_query(&params.region).await?;
    let report = state.report_service.build_demo(query).await?;

    if params.format.unwrap_or_default() == ResponseFormat::Json {
        return Ok(Json(report).into_response());
    }

    let site = &state.site;
    Ok(DemoTemplate {
        page_title: format!("{} demo", site.page_header),
        page_header: site.page_header.clone(),
        home_url: site.home_url.clone(),
        query: report.query.region.to_string(),
        variant_set_id: report.query.variant_set_id.clone(),
        variants: variant_rows(&report.variants),
        locations: report.locations,
    }
    .into_response())
}
