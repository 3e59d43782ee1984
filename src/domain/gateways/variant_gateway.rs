//! Gateway trait for a GA4GH variant server.

use async_trait::async_trait;

use crate::domain::entities::{Dataset, GenomicRegion, Variant, VariantSet};
use crate::error::AppError;

/// Read access to a GA4GH-compatible server (BRCA Exchange by default).
///
/// All searches follow pagination to the end before returning.
///
/// # Implementations
///
/// - [`crate::infrastructure::ga4gh::Ga4ghClient`] - HTTP implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VariantGateway: Send + Sync {
    /// Lists every dataset on the server.
    async fn search_datasets(&self) -> Result<Vec<Dataset>, AppError>;

    /// Lists the variant sets of one dataset.
    async fn search_variant_sets(&self, dataset_id: &str) -> Result<Vec<VariantSet>, AppError>;

    /// Returns the variants of `variant_set_id` overlapping `region`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on transport failures, non-success
    /// responses or undecodable payloads.
    async fn search_variants(
        &self,
        variant_set_id: &str,
        region: &GenomicRegion,
    ) -> Result<Vec<Variant>, AppError>;
}
