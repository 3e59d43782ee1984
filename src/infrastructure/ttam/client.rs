//! HTTP client for the 23andMe resource endpoints.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::domain::entities::{AccountProfile, Genotypes, TtamUser};
use crate::domain::gateways::GenotypeGateway;
use crate::error::AppError;
use crate::infrastructure::http::{HttpSettings, UpstreamClient, UpstreamError, as_base};

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    profiles: Vec<ProfileResponse>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    id: String,
    #[serde(default)]
    genotyped: bool,
}

/// 23andMe API rooted at `https://<api server>/`.
#[derive(Debug, Clone)]
pub struct TtamClient {
    http: UpstreamClient,
    base_url: Url,
}

impl TtamClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url, settings: &HttpSettings) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: UpstreamClient::new("23andMe", settings)?,
            base_url: as_base(base_url),
        })
    }
}

#[async_trait]
impl GenotypeGateway for TtamClient {
    async fn fetch_genotypes(&self, token: &str, locations: &[String]) -> Result<Genotypes, AppError> {
        let url = self.base_url.join("1/genotype/").map_err(UpstreamError::from)?;
        let query = [("locations", locations.join(" "))];

        let raw: Value = self.http.get_json(&url, Some(token), &query).await?;
        let genotypes = Genotypes::from_payload(raw);

        tracing::info!(
            requested = locations.len(),
            profiles = genotypes.profiles.len(),
            calls = genotypes.calls().count(),
            "23andMe genotypes fetched"
        );

        Ok(genotypes)
    }

    async fn fetch_user(&self, token: &str) -> Result<TtamUser, AppError> {
        let url = self.base_url.join("1/user/").map_err(UpstreamError::from)?;
        let user: UserResponse = self.http.get_json(&url, Some(token), &[]).await?;

        Ok(TtamUser {
            id: user.id,
            profiles: user
                .profiles
                .into_iter()
                .map(|p| AccountProfile {
                    id: p.id,
                    genotyped: p.genotyped,
                })
                .collect(),
        })
    }
}
