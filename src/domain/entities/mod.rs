//! Domain entities.
//!
//! - [`SnpRecord`], [`SnpLocation`], [`SnpCatalog`] - the SNP data file
//! - [`GenomicRegion`] - the query window
//! - [`Variant`], [`Dataset`], [`VariantSet`] - GA4GH records
//! - [`Genotypes`], [`GenotypeCall`], [`TtamUser`] - 23andMe payloads
//! - [`AccessToken`] - cached OAuth2 bearer token

pub mod genotype;
pub mod region;
pub mod snp;
pub mod token;
pub mod variant;

pub use genotype::{AccountProfile, GenotypeCall, GenotypeProfile, Genotypes, TtamUser};
pub use region::GenomicRegion;
pub use snp::{SnpCatalog, SnpLocation, SnpRecord};
pub use token::AccessToken;
pub use variant::{Dataset, Variant, VariantSet};
