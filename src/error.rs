//! Application error type and its HTTP rendering.
//!
//! Every handler returns [`AppError`] on failure. Infrastructure errors
//! ([`UpstreamError`], [`CatalogError`]) are converted at the boundary so
//! handlers never see transport details.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::infrastructure::http::UpstreamError;
use crate::infrastructure::snp_file::CatalogError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Upstream { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn upstream(message: impl Into<String>, details: Value) -> Self {
        Self::Upstream {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized { .. })
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::Unauthorized { message, details } => ("unauthorized", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Upstream { message, details } => ("upstream_error", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Invalid query parameters", details)
    }
}

impl From<UpstreamError> for AppError {
    fn from(e: UpstreamError) -> Self {
        match &e {
            UpstreamError::Status {
                service,
                status,
                url,
                ..
            } if *status == 401 || *status == 403 => AppError::unauthorized(
                format!("{service} rejected the access token"),
                json!({ "service": service, "status": status, "url": url }),
            ),
            UpstreamError::Status {
                service,
                status,
                url,
                body,
            } => AppError::upstream(
                format!("{service} returned HTTP {status}"),
                json!({ "service": service, "status": status, "url": url, "body": body }),
            ),
            UpstreamError::Transport { service, source } => AppError::upstream(
                format!("{service} is unreachable"),
                json!({ "service": service, "reason": source.to_string() }),
            ),
            UpstreamError::Decode { service, source } => AppError::upstream(
                format!("{service} returned an unexpected payload"),
                json!({ "service": service, "reason": source.to_string() }),
            ),
            UpstreamError::InvalidUrl(source) => {
                AppError::internal("Invalid upstream URL", json!({ "reason": source.to_string() }))
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::internal("SNP catalog error", json!({ "reason": e.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized("x", json!({})).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::upstream("x", json!({})).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_upstream_auth_failure_maps_to_unauthorized() {
        let err: AppError = UpstreamError::Status {
            service: "23andMe",
            status: 401,
            url: "https://api.23andme.com/1/user/".to_string(),
            body: String::new(),
        }
        .into();

        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_upstream_server_error_maps_to_bad_gateway() {
        let err: AppError = UpstreamError::Status {
            service: "GA4GH",
            status: 500,
            url: "https://ga4gh.test/variants/search".to_string(),
            body: "boom".to_string(),
        }
        .into();

        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        let info = err.to_error_info();
        assert_eq!(info.code, "upstream_error");
        assert_eq!(info.details["status"], 500);
    }
}
