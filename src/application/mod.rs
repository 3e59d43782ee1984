//! Application layer services.
//!
//! Services consume the gateway traits from [`crate::domain::gateways`] and
//! give HTTP handlers a small API.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - OAuth2 state signing and token cache
//! - [`services::report_service::ReportService`] - Genotype/variant report assembly

pub mod services;
