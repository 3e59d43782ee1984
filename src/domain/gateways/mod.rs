//! Gateway traits for the two external APIs.
//!
//! Implemented by [`crate::infrastructure`]; mocked in service unit tests.

pub mod genotype_gateway;
pub mod variant_gateway;

pub use genotype_gateway::{GenotypeGateway, OAuthGateway};
pub use variant_gateway::VariantGateway;

#[cfg(test)]
pub use genotype_gateway::{MockGenotypeGateway, MockOAuthGateway};
#[cfg(test)]
pub use variant_gateway::MockVariantGateway;
