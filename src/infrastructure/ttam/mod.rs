//! 23andMe API integration: OAuth2 and resource endpoints.

pub mod client;
pub mod oauth;

pub use client::TtamClient;
pub use oauth::{OAuthSettings, TtamOAuth};
