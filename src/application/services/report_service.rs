//! Assembly of genotype/variant reports.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::domain::entities::{GenomicRegion, Genotypes, SnpCatalog, SnpLocation, TtamUser, Variant};
use crate::domain::gateways::{GenotypeGateway, VariantGateway};
use crate::domain::matching::{SnpMatch, match_calls};
use crate::error::AppError;

/// Metadata key carrying catalog identifiers on hydrated variants.
pub const SNP_INFO_KEY: &str = "23andme.snp";
/// Metadata key carrying the user's calls on hydrated variants.
pub const CALL_INFO_KEY: &str = "23andme.call";

/// A resolved query: which variant set, which window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportQuery {
    pub variant_set_id: String,
    #[serde(flatten)]
    pub region: GenomicRegion,
}

/// Everything shown on the app page.
#[derive(Debug, Clone, Serialize)]
pub struct SnpReport {
    pub user: TtamUser,
    pub genotypes: Genotypes,
    pub variants: Vec<Variant>,
    pub locations: Vec<SnpLocation>,
    pub matches: Vec<SnpMatch>,
    pub query: ReportQuery,
}

/// The report shown without a 23andMe login.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub variants: Vec<Variant>,
    pub locations: Vec<SnpLocation>,
    pub query: ReportQuery,
}

/// Service combining the SNP catalog, the 23andMe API and a GA4GH server.
///
/// Upstream calls are issued one after another.
pub struct ReportService<G: GenotypeGateway, V: VariantGateway> {
    genotypes: Arc<G>,
    variants: Arc<V>,
    catalog: Arc<SnpCatalog>,
    default_snps: Vec<String>,
}

impl<G: GenotypeGateway, V: VariantGateway> ReportService<G, V> {
    /// Creates a new report service.
    ///
    /// `default_snps` are always requested from 23andMe in addition to the
    /// catalog SNPs inside the queried region.
    pub fn new(
        genotypes: Arc<G>,
        variants: Arc<V>,
        catalog: Arc<SnpCatalog>,
        default_snps: Vec<String>,
    ) -> Self {
        Self {
            genotypes,
            variants,
            catalog,
            default_snps,
        }
    }

    pub fn catalog(&self) -> &SnpCatalog {
        &self.catalog
    }

    /// Picks the variant set to search.
    ///
    /// A non-empty `preferred` id is used as-is. Otherwise the first variant
    /// set of the first dataset on the server is used.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the server has no dataset or the
    /// first dataset has no variant set.
    pub async fn resolve_variant_set(&self, preferred: Option<&str>) -> Result<String, AppError> {
        if let Some(id) = preferred.map(str::trim).filter(|id| !id.is_empty()) {
            return Ok(id.to_string());
        }

        let datasets = self.variants.search_datasets().await?;
        let dataset = datasets.first().ok_or_else(|| {
            AppError::not_found("GA4GH server has no datasets", json!({}))
        })?;

        let sets = self.variants.search_variant_sets(&dataset.id).await?;
        let set = sets.first().ok_or_else(|| {
            AppError::not_found(
                "GA4GH dataset has no variant sets",
                json!({ "dataset_id": dataset.id }),
            )
        })?;

        tracing::info!(dataset_id = %dataset.id, variant_set_id = %set.id, "variant set discovered");
        Ok(set.id.clone())
    }

    /// Builds the full report for an authenticated user.
    ///
    /// # Errors
    ///
    /// Propagates gateway errors: the first failing upstream call aborts the
    /// report.
    pub async fn build_report(&self, token: &str, query: ReportQuery) -> Result<SnpReport, AppError> {
        let locations = self.catalog.filter(&query.region);
        let requested = self.requested_locations(&locations);

        tracing::info!(
            region = %query.region,
            locations = locations.len(),
            requested = requested.len(),
            "building report"
        );

        let genotypes = self.genotypes.fetch_genotypes(token, &requested).await?;
        let user = self.genotypes.fetch_user(token).await?;
        let variants = self
            .variants
            .search_variants(&query.variant_set_id, &query.region)
            .await?;

        let matches = match_calls(&genotypes, &locations, &variants);
        tracing::info!(matches = matches.len(), "report built");

        Ok(SnpReport {
            user,
            genotypes,
            variants,
            locations,
            matches,
            query,
        })
    }

    /// Builds the variant/location report without touching 23andMe.
    pub async fn build_demo(&self, query: ReportQuery) -> Result<DemoReport, AppError> {
        let locations = self.catalog.filter(&query.region);
        let variants = self
            .variants
            .search_variants(&query.variant_set_id, &query.region)
            .await?;

        Ok(DemoReport {
            variants,
            locations,
            query,
        })
    }

    /// Searches variants and annotates them with catalog SNP identifiers
    /// and, when `token` is given, the user's calls at those SNPs.
    ///
    /// A variant is linked to a SNP when they share chromosome and the
    /// variant's start equals the SNP position.
    pub async fn hydrate_variants(
        &self,
        token: Option<&str>,
        query: &ReportQuery,
    ) -> Result<Vec<Variant>, AppError> {
        let mut variants = self
            .variants
            .search_variants(&query.variant_set_id, &query.region)
            .await?;

        let mut linked: Vec<String> = Vec::new();
        for variant in &mut variants {
            let ids: Vec<String> = self
                .catalog
                .ids_at(&variant.reference_name, variant.start)
                .into_iter()
                .map(str::to_string)
                .collect();
            for id in &ids {
                variant.annotate(SNP_INFO_KEY, id.clone());
                if !linked.contains(id) {
                    linked.push(id.clone());
                }
            }
        }

        let Some(token) = token else {
            return Ok(variants);
        };
        if linked.is_empty() {
            return Ok(variants);
        }

        let genotypes = self.genotypes.fetch_genotypes(token, &linked).await?;
        for variant in &mut variants {
            let snps = variant.info.get(SNP_INFO_KEY).cloned().unwrap_or_default();
            for (profile_id, call) in genotypes.calls() {
                if snps.contains(&call.location) {
                    variant.annotate(
                        CALL_INFO_KEY,
                        format!("{profile_id}:{}:{}", call.location, call.call),
                    );
                }
            }
        }

        Ok(variants)
    }

    /// Default SNP panel followed by region SNPs, without duplicates.
    fn requested_locations(&self, locations: &[SnpLocation]) -> Vec<String> {
        let mut requested = self.default_snps.clone();
        for location in locations {
            if !requested.contains(&location.id) {
                requested.push(location.id.clone());
            }
        }
        requested
    }
}
