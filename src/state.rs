//! Shared application state injected into every handler.

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use crate::api::dto::query::RegionParams;
use crate::application::services::{AuthService, ReportQuery, ReportService};
use crate::config::{Config, PAGE_HEADER};
use crate::domain::entities::{GenomicRegion, SnpCatalog};
use crate::error::AppError;
use crate::infrastructure::ga4gh::Ga4ghClient;
use crate::infrastructure::ttam::{TtamClient, TtamOAuth};

pub type AppAuthService = AuthService<TtamOAuth>;
pub type AppReportService = ReportService<TtamClient, Ga4ghClient>;

/// Static values rendered into pages and used as query defaults.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub page_header: String,
    pub client_id: String,
    pub home_url: String,
    pub demo_url: String,
    pub variant_set_id: Option<String>,
    pub default_region: GenomicRegion,
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AppAuthService>,
    pub report_service: Arc<AppReportService>,
    pub site: Arc<SiteSettings>,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AppAuthService>,
        report_service: Arc<AppReportService>,
        site: SiteSettings,
    ) -> Self {
        Self {
            auth_service,
            report_service,
            site: Arc::new(site),
        }
    }

    /// Wires clients and services from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an upstream client cannot be built or the
    /// default region is invalid.
    pub fn from_config(config: &Config, catalog: SnpCatalog) -> Result<Self> {
        let http = config.http_settings();

        let oauth = TtamOAuth::new(config.oauth_settings()?, &http)?;
        let ttam = TtamClient::new(config.api_base_url.clone(), &http)?;
        let ga4gh = Ga4ghClient::new(config.ga4gh_url.clone(), &http)?;

        let auth_service = Arc::new(AuthService::new(Arc::new(oauth)));
        let report_service = Arc::new(ReportService::new(
            Arc::new(ttam),
            Arc::new(ga4gh),
            Arc::new(catalog),
            config.default_snps.clone(),
        ));

        let default_region = GenomicRegion::new(&config.reference_name, config.start, config.end)
            .map_err(|e| anyhow::anyhow!("invalid default region: {e}"))?;

        let site = SiteSettings {
            page_header: PAGE_HEADER.to_string(),
            client_id: config.client_id.clone(),
            home_url: config.public_url.to_string(),
            demo_url: config.demo_url(),
            variant_set_id: config.variant_set_id.clone(),
            default_region,
        };

        Ok(Self::new(auth_service, report_service, site))
    }

    /// Fills missing query parameters from the defaults and resolves the
    /// variant set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty or inverted region and
    /// propagates variant-set discovery failures.
    pub async fn resolve_query(&self, params: &RegionParams) -> Result<ReportQuery, AppError> {
        let defaults = &self.site.default_region;
        let region = GenomicRegion::new(
            params
                .reference_name
                .clone()
                .unwrap_or_else(|| defaults.reference_name.clone()),
            params.start.unwrap_or(defaults.start),
            params.end.unwrap_or(defaults.end),
        )?;

        let preferred = params
            .variant_set_id
            .as_deref()
            .or(self.site.variant_set_id.as_deref());

        let variant_set_id = self
            .report_service
            .resolve_variant_set(preferred)
            .await
            .map_err(|e| match e {
                AppError::NotFound { message, details } => AppError::upstream(
                    message,
                    json!({ "reason": "variant set discovery failed", "details": details }),
                ),
                other => other,
            })?;

        Ok(ReportQuery {
            variant_set_id,
            region,
        })
    }
}
