//! Domain layer: entities, the join step and gateway traits.
//!
//! # Architecture
//!
//! - [`entities`] - SNP catalog, regions, variants, genotypes, tokens
//! - [`gateways`] - Traits for the 23andMe and GA4GH APIs
//! - [`matching`] - Nested-loop join of calls, SNP locations and variants
//!
//! The domain layer has no dependency on HTTP clients or the web framework;
//! [`crate::infrastructure`] implements the gateway traits.

pub mod entities;
pub mod gateways;
pub mod matching;
