//! Gateway trait for the 23andMe personal genome API.

use async_trait::async_trait;

use crate::domain::entities::{AccessToken, Genotypes, TtamUser};
use crate::error::AppError;

/// Access to the 23andMe API on behalf of an authenticated user.
///
/// # Implementations
///
/// - [`crate::infrastructure::ttam::TtamClient`] - HTTP implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenotypeGateway: Send + Sync {
    /// Fetches the user's calls at `locations` for every profile on the
    /// account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is rejected and
    /// [`AppError::Upstream`] for any other non-success response.
    async fn fetch_genotypes(&self, token: &str, locations: &[String]) -> Result<Genotypes, AppError>;

    /// Fetches the account and its profiles.
    ///
    /// # Errors
    ///
    /// Same as [`GenotypeGateway::fetch_genotypes`].
    async fn fetch_user(&self, token: &str) -> Result<TtamUser, AppError>;
}

/// The OAuth2 authorization-code flow against 23andMe.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OAuthGateway: Send + Sync {
    /// Builds the URL the browser is sent to, carrying `state`.
    fn authorization_url(&self, state: &str) -> String;

    /// Exchanges an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the code is rejected and
    /// [`AppError::Upstream`] if the token endpoint fails.
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, AppError>;
}
