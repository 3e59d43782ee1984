//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: SNP catalog loaded
/// - **503 Service Unavailable**: SNP catalog is empty
///
/// The access-token check is informational and never degrades the status.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "snp_catalog": { "status": "ok", "message": "960613 SNPs" },
///     "access_token": { "status": "ok", "message": "No token cached" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let catalog_check = check_catalog(&state);
    let token_check = check_token(&state).await;

    let healthy = catalog_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            snp_catalog: catalog_check,
            access_token: token_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn check_catalog(state: &AppState) -> CheckStatus {
    let size = state.report_service.catalog().len();
    if size == 0 {
        CheckStatus {
            status: "error".to_string(),
            message: Some("SNP catalog is empty".to_string()),
        }
    } else {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{size} SNPs")),
        }
    }
}

async fn check_token(state: &AppState) -> CheckStatus {
    let message = match state.auth_service.cached_token().await {
        Some(token) => format!("Token cached since {}", token.obtained_at.to_rfc3339()),
        None => "No token cached".to_string(),
    };

    CheckStatus {
        status: "ok".to_string(),
        message: Some(message),
    }
}
