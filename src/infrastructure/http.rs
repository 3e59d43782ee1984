//! Shared HTTP plumbing for upstream APIs.
//!
//! Wraps a [`reqwest::Client`] with status checking, JSON decoding and
//! retry of idempotent calls. Non-idempotent calls (the OAuth token exchange)
//! go through [`UpstreamClient::post_form`], which never retries.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use url::Url;

/// Maximum number of response body bytes kept in error reports.
const ERROR_BODY_LIMIT: usize = 512;

/// Errors raised while talking to 23andMe or the GA4GH server.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        source: reqwest::Error,
    },

    #[error("{service} returned HTTP {status} for {url}")]
    Status {
        service: &'static str,
        status: u16,
        url: String,
        body: String,
    },

    #[error("{service} returned an undecodable payload: {source}")]
    Decode {
        service: &'static str,
        source: serde_json::Error,
    },

    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl UpstreamError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            UpstreamError::Transport { source, .. } => {
                source.is_timeout() || source.is_connect() || source.is_request()
            }
            UpstreamError::Status { status, .. } => *status >= 500 || *status == 429,
            UpstreamError::Decode { .. } | UpstreamError::InvalidUrl(_) => false,
        }
    }
}

/// Connection settings shared by all upstream clients.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub retries: usize,
    pub accept_invalid_certs: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retries: 2,
            accept_invalid_certs: false,
        }
    }
}

/// A named upstream service reached over HTTP.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    service: &'static str,
    client: Client,
    retries: usize,
}

impl UpstreamClient {
    /// Builds a client for `service` with the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Transport`] if the TLS backend cannot be
    /// initialised.
    pub fn new(service: &'static str, settings: &HttpSettings) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| UpstreamError::Transport { service, source })?;

        Ok(Self {
            service,
            client,
            retries: settings.retries,
        })
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Issues a GET and decodes the JSON body. Retried on transient failures.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        bearer: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let client = &self.client;
        self.with_retry(|| {
            let mut req = client.get(url.clone()).query(query);
            if let Some(token) = bearer {
                req = req.bearer_auth(token);
            }
            req
        })
        .await
    }

    /// Issues a POST with a JSON body and decodes the JSON response.
    /// Retried on transient failures, so only use it for idempotent searches.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &Url,
        body: &B,
    ) -> Result<T, UpstreamError> {
        let client = &self.client;
        self.with_retry(|| client.post(url.clone()).json(body)).await
    }

    /// Issues a form-encoded POST exactly once.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        url: &Url,
        form: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let response = self
            .client
            .post(url.clone())
            .form(form)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                service: self.service,
                source,
            })?;

        read_json(self.service, response).await
    }

    async fn with_retry<T, F>(&self, build: F) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let service = self.service;
        let strategy = ExponentialBackoff::from_millis(10)
            .factor(10)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(self.retries);

        RetryIf::spawn(
            strategy,
            || {
                let req = build();
                async move {
                    let response = req
                        .send()
                        .await
                        .map_err(|source| UpstreamError::Transport { service, source })?;
                    read_json(service, response).await
                }
            },
            |e: &UpstreamError| {
                let transient = e.is_transient();
                if transient {
                    tracing::warn!(service, error = %e, "transient upstream failure, retrying");
                }
                transient
            },
        )
        .await
    }
}

/// Checks the status and decodes the body of an upstream response.
async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> Result<T, UpstreamError> {
    let status = response.status();
    let url = response.url().to_string();
    tracing::debug!(service, %status, %url, "upstream response");

    if !status.is_success() {
        let mut body = response.text().await.unwrap_or_default();
        if body.len() > ERROR_BODY_LIMIT {
            let mut cut = ERROR_BODY_LIMIT;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        return Err(UpstreamError::Status {
            service,
            status: status.as_u16(),
            url,
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|source| UpstreamError::Transport { service, source })?;

    serde_json::from_slice(&bytes).map_err(|source| UpstreamError::Decode { service, source })
}

/// Ensures a base URL ends with `/` so that [`Url::join`] appends rather than
/// replaces the last path segment.
pub fn as_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
