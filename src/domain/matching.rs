//! Join of genotype calls against SNP locations and GA4GH variants.

use serde::Serialize;

use crate::domain::entities::{Genotypes, SnpLocation, Variant};

/// A genotype call that lands on a variant start via the SNP catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnpMatch {
    pub profile_id: String,
    pub location: String,
    pub position: u64,
    pub call: String,
    pub variant_id: String,
    pub variant_names: Vec<String>,
    pub reference_bases: String,
    pub alternate_bases: Vec<String>,
}

/// Nested-loop join: call → location with the same identifier → variant
/// whose start equals the location's position.
///
/// Output order follows the loop order (calls, then locations, then
/// variants). Each match is also logged at debug level.
pub fn match_calls(
    genotypes: &Genotypes,
    locations: &[SnpLocation],
    variants: &[Variant],
) -> Vec<SnpMatch> {
    let mut matches = Vec::new();

    for (profile_id, call) in genotypes.calls() {
        for location in locations.iter().filter(|l| l.id == call.location) {
            for variant in variants.iter().filter(|v| v.start == location.position) {
                tracing::debug!(
                    profile_id,
                    location = %location.id,
                    position = location.position,
                    call = %call.call,
                    variant = %variant.id,
                    "genotype call matches variant"
                );

                matches.push(SnpMatch {
                    profile_id: profile_id.to_string(),
                    location: location.id.clone(),
                    position: location.position,
                    call: call.call.clone(),
                    variant_id: variant.id.clone(),
                    variant_names: variant.names.clone(),
                    reference_bases: variant.reference_bases.clone(),
                    alternate_bases: variant.alternate_bases.clone(),
                });
            }
        }
    }

    matches
}
