//! OAuth2 authorization-code flow against the 23andMe API.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use url::Url;

use crate::domain::entities::AccessToken;
use crate::domain::gateways::OAuthGateway;
use crate::error::AppError;
use crate::infrastructure::http::{HttpSettings, UpstreamClient, UpstreamError};

/// Static OAuth2 client registration.
#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: Url,
    pub scopes: Vec<String>,
    pub authorize_url: Url,
    pub token_url: Url,
    pub select_profile: bool,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// The 23andMe token endpoint plus the settings needed to build the
/// authorization URL.
#[derive(Debug, Clone)]
pub struct TtamOAuth {
    http: UpstreamClient,
    settings: OAuthSettings,
}

impl TtamOAuth {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(settings: OAuthSettings, http: &HttpSettings) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: UpstreamClient::new("23andMe", http)?,
            settings,
        })
    }

    fn scope(&self) -> String {
        self.settings.scopes.join(" ")
    }
}

#[async_trait]
impl OAuthGateway for TtamOAuth {
    fn authorization_url(&self, state: &str) -> String {
        let mut url = self.settings.authorize_url.clone();
        {
            let mut query = url.query_pairs_mut();
            if self.settings.select_profile {
                query.append_pair("select_profile", "true");
            }
            query
                .append_pair("response_type", "code")
                .append_pair("client_id", &self.settings.client_id)
                .append_pair("redirect_uri", self.settings.redirect_uri.as_str())
                .append_pair("scope", &self.scope())
                .append_pair("state", state);
        }
        url.into()
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, AppError> {
        let scope = self.scope();
        let form = [
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("scope", scope.as_str()),
        ];

        let response: TokenResponse = self
            .http
            .post_form(&self.settings.token_url, &form)
            .await
            .map_err(|e| match e {
                // The token endpoint answers a bad or reused code with 400.
                UpstreamError::Status { status, .. } if status == 400 => AppError::unauthorized(
                    "Authorization code was rejected",
                    serde_json::json!({ "reason": e.to_string() }),
                ),
                // 401 here is about the client registration, not the user.
                UpstreamError::Status { status, .. } if status == 401 => AppError::unauthorized(
                    "23andMe rejected the client credentials; check the client id and secret",
                    serde_json::json!({ "reason": e.to_string() }),
                ),
                other => other.into(),
            })?;

        tracing::info!(scope = ?response.scope, expires_in = ?response.expires_in, "access token obtained");

        Ok(AccessToken::new(
            response.access_token,
            response.refresh_token,
            response.scope,
            response.expires_in,
            Utc::now(),
        ))
    }
}
