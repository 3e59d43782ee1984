//! Infrastructure layer: HTTP clients for the external APIs and the SNP
//! data file loader.
//!
//! - [`http`] - Shared reqwest wrapper with retry and error mapping
//! - [`ttam`] - 23andMe OAuth2 and genotype endpoints
//! - [`ga4gh`] - GA4GH variant search
//! - [`snp_file`] - Tab-separated SNP catalog loader

pub mod ga4gh;
pub mod http;
pub mod snp_file;
pub mod ttam;
