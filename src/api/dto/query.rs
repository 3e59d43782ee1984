//! Query-string parameters shared by the app and search endpoints.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

/// Region and variant-set overrides.
///
/// Every field is optional; missing values fall back to the configured
/// defaults. Numbers are parsed with `serde_with` because flattened query
/// structs see every value as a string.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegionParams {
    #[validate(length(min = 1, max = 32))]
    pub reference_name: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub start: Option<u64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub end: Option<u64>,

    #[validate(length(max = 128))]
    pub variant_set_id: Option<String>,
}

/// Output format of the app page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Html,
    Json,
}

/// Parameters of the OAuth redirect target `GET /app/`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AppParams {
    pub code: Option<String>,
    pub state: Option<String>,
    #[serde(default)]
    pub format: Option<ResponseFormat>,

    #[serde(flatten)]
    #[validate(nested)]
    pub region: RegionParams,
}

/// Parameters of `GET /demo/`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct DemoParams {
    #[serde(default)]
    pub format: Option<ResponseFormat>,

    #[serde(flatten)]
    #[validate(nested)]
    pub region: RegionParams,
}
