//! OAuth2 session handling: signed `state` values and the access-token cache.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use tokio::sync::RwLock;

use crate::domain::entities::AccessToken;
use crate::domain::gateways::OAuthGateway;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// An authorization URL together with the `state` it carries.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
}

/// Service driving the 23andMe authorization-code flow.
///
/// The `state` parameter is `nonce.signature`, where the signature is an
/// HMAC-SHA256 of the nonce under a per-process key, so callbacks can be
/// checked without storing issued states.
///
/// One access token is cached for the whole process and reused across
/// requests until it expires. There is no refresh flow.
pub struct AuthService<O: OAuthGateway> {
    oauth: Arc<O>,
    state_key: Vec<u8>,
    token: RwLock<Option<AccessToken>>,
}

impl<O: OAuthGateway> AuthService<O> {
    /// Creates the service with a freshly generated state-signing key.
    pub fn new(oauth: Arc<O>) -> Self {
        let key: [u8; 32] = rand::random();
        Self::with_state_key(oauth, key.to_vec())
    }

    /// Creates the service with a fixed state-signing key.
    pub fn with_state_key(oauth: Arc<O>, state_key: Vec<u8>) -> Self {
        Self {
            oauth,
            state_key,
            token: RwLock::new(None),
        }
    }

    fn sign(&self, nonce: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(&self.state_key)
            .expect("HMAC accepts any key length");
        mac.update(nonce.as_bytes());
        mac
    }

    /// Issues a new signed state and the authorization URL carrying it.
    pub fn begin_authorization(&self) -> AuthorizationRequest {
        let nonce_bytes: [u8; 16] = rand::random();
        let nonce = URL_SAFE_NO_PAD.encode(nonce_bytes);
        let signature = URL_SAFE_NO_PAD.encode(self.sign(&nonce).finalize().into_bytes());
        let state = format!("{nonce}.{signature}");
        let url = self.oauth.authorization_url(&state);

        tracing::info!(auth_url = %url, state = %state, "authorization URL issued");

        AuthorizationRequest { url, state }
    }

    /// Checks that `state` was issued by this process.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the state is malformed or its
    /// signature does not verify.
    pub fn verify_state(&self, state: &str) -> Result<(), AppError> {
        let invalid = || {
            AppError::bad_request(
                "Invalid OAuth state",
                json!({ "reason": "state was not issued by this server" }),
            )
        };

        let (nonce, signature) = state.split_once('.').ok_or_else(invalid)?;
        let signature = URL_SAFE_NO_PAD.decode(signature).map_err(|_| invalid())?;

        self.sign(nonce)
            .verify_slice(&signature)
            .map_err(|_| invalid())
    }

    /// Returns a usable bearer token.
    ///
    /// A cached, unexpired token is reused and `code`/`state` are ignored.
    /// Otherwise `state` is verified and `code` exchanged; the new token
    /// replaces the cache.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthorized`] if there is no cached token and no code,
    ///   or the code is rejected
    /// - [`AppError::Validation`] if the state is missing or forged
    /// - [`AppError::Upstream`] if the token endpoint fails
    pub async fn access_token(
        &self,
        code: Option<&str>,
        state: Option<&str>,
    ) -> Result<String, AppError> {
        if let Some(token) = self.cached_token().await {
            tracing::debug!("reusing cached access token");
            return Ok(token.value);
        }

        let code = code.filter(|c| !c.is_empty()).ok_or_else(|| {
            AppError::unauthorized(
                "Not authenticated",
                json!({ "reason": "no authorization code; start at /" }),
            )
        })?;

        let state = state.ok_or_else(|| {
            AppError::bad_request("Missing OAuth state", json!({ "field": "state" }))
        })?;
        self.verify_state(state)?;

        let token = self.oauth.exchange_code(code).await?;
        let value = token.value.clone();
        *self.token.write().await = Some(token);

        Ok(value)
    }

    /// Returns the cached token if one is present and unexpired.
    pub async fn cached_token(&self) -> Option<AccessToken> {
        self.token
            .read()
            .await
            .as_ref()
            .filter(|t| !t.is_expired(Utc::now()))
            .cloned()
    }

    /// Drops the cached token, e.g. after the API rejected it.
    pub async fn clear(&self) {
        if self.token.write().await.take().is_some() {
            tracing::info!("cached access token cleared");
        }
    }
}
