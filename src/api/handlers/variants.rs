//! Handler for the hydrated variant search endpoint.

use axum::{
    Json,
    extract::{Query, State},
};
use validator::Validate;

use crate::api::dto::query::RegionParams;
use crate::api::dto::report::VariantSearchResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Searches GA4GH variants and annotates them with 23andMe data.
///
/// # Endpoint
///
/// `GET /variants/search/`
///
/// # Query Parameters
///
/// - `reference_name`, `start`, `end` - region (defaults from configuration)
/// - `variant_set_id` - variant set (default from configuration)
///
/// # Annotation
///
/// Each variant whose chromosome and start match a SNP data row gets the SNP
/// identifiers under `info["23andme.snp"]`. When the user has logged in (a
/// token is cached), their calls at those SNPs are added under
/// `info["23andme.call"]` as `profile:snp:call`.
///
/// # Errors
///
/// - 400 for invalid parameters
/// - 401 if 23andMe rejects the cached token (the token is dropped)
/// - 502 if the GA4GH server or 23andMe fails
pub async fn search_variants_handler(
    State(state): State<AppState>,
    Query(params): Query<RegionParams>,
) -> Result<Json<VariantSearchResponse>, AppError> {
    params.validate()?;

    let query = state.resolve_query(&params).await?;
    let token = state.auth_service.cached_token().await.map(|t| t.value);

    let variants = match state
        .report_service
        .hydrate_variants(token.as_deref(), &query)
        .await
    {
        Err(e) if e.is_unauthorized() => {
            state.auth_service.clear().await;
            return Err(e);
        }
        other => other?,
    };

    Ok(Json(VariantSearchResponse {
        variant_set_id: query.variant_set_id,
        reference_name: query.region.reference_name,
        start: query.region.start,
        end: query.region.end,
        genotyped: token.is_some(),
        variants,
        next_page_token: None,
    }))
}
