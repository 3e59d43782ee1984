//! JSON bodies for the app and variant search endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::application::services::{ReportQuery, SnpReport};
use crate::domain::entities::{SnpLocation, TtamUser, Variant};
use crate::domain::matching::SnpMatch;

/// `GET /app/?format=json` body.
///
/// `genotypes` is the 23andMe payload exactly as received. `variants` is a
/// JSON array of variant objects rather than a list serialized into a
/// string, so clients need a single decode.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub user: TtamUser,
    pub genotypes: Value,
    pub variants: Vec<Variant>,
    pub locations: Vec<SnpLocation>,
    pub matches: Vec<SnpMatch>,
    pub query: ReportQuery,
}

impl From<SnpReport> for ReportResponse {
    fn from(report: SnpReport) -> Self {
        Self {
            user: report.user,
            genotypes: report.genotypes.raw,
            variants: report.variants,
            locations: report.locations,
            matches: report.matches,
            query: report.query,
        }
    }
}

/// `GET /variants/search/` body, shaped like a GA4GH search response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSearchResponse {
    pub variant_set_id: String,
    pub reference_name: String,
    pub start: u64,
    pub end: u64,
    /// Whether the user's calls were attached (a token was cached).
    pub genotyped: bool,
    pub variants: Vec<Variant>,
    pub next_page_token: Option<String>,
}
