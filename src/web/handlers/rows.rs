//! Flattened table rows for templates.

use crate::application::services::{CALL_INFO_KEY, SNP_INFO_KEY};
use crate::domain::entities::Variant;
use crate::domain::matching::SnpMatch;

pub struct VariantRow {
    pub id: String,
    pub names: String,
    pub location: String,
    pub reference_bases: String,
    pub alternate_bases: String,
    pub snps: String,
    pub calls: String,
}

impl From<&Variant> for VariantRow {
    fn from(variant: &Variant) -> Self {
        let info = |key: &str| {
            variant
                .info
                .get(key)
                .map(|values| values.join(", "))
                .unwrap_or_default()
        };

        Self {
            id: variant.id.clone(),
            names: variant.names.join(", "),
            location: format!(
                "{}:{}-{}",
                variant.reference_name, variant.start, variant.end
            ),
            reference_bases: variant.reference_bases.clone(),
            alternate_bases: variant.alternate_bases.join(", "),
            snps: info(SNP_INFO_KEY),
            calls: info(CALL_INFO_KEY),
        }
    }
}

pub struct MatchRow {
    pub profile_id: String,
    pub location: String,
    pub position: u64,
    pub call: String,
    pub variant: String,
    pub change: String,
}

impl From<&SnpMatch> for MatchRow {
    fn from(m: &SnpMatch) -> Self {
        let variant = if m.variant_names.is_empty() {
            m.variant_id.clone()
        } else {
            m.variant_names.join(", ")
        };

        Self {
            profile_id: m.profile_id.clone(),
            location: m.location.clone(),
            position: m.position,
            call: m.call.clone(),
            variant,
            change: format!("{} > {}", m.reference_bases, m.alternate_bases.join("/")),
        }
    }
}

pub fn variant_rows(variants: &[Variant]) -> Vec<VariantRow> {
    variants.iter().map(VariantRow::from).collect()
}

pub fn match_rows(matches: &[SnpMatch]) -> Vec<MatchRow> {
    matches.iter().map(MatchRow::from).collect()
}
