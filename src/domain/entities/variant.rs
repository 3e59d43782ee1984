//! GA4GH variant entities.

use std::collections::BTreeMap;

use serde::Serialize;

/// A variant record as served by a GA4GH variant search.
///
/// Serialized in GA4GH camelCase so responses can be fed back to GA4GH
/// tooling. `start` is the position the join step compares against SNP
/// positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    pub variant_set_id: String,
    pub names: Vec<String>,
    pub reference_name: String,
    pub start: u64,
    pub end: u64,
    pub reference_bases: String,
    pub alternate_bases: Vec<String>,
    pub info: BTreeMap<String, Vec<String>>,
}

impl Variant {
    /// Appends `value` under `key` in the metadata map.
    pub fn annotate(&mut self, key: &str, value: impl Into<String>) {
        self.info.entry(key.to_string()).or_default().push(value.into());
    }
}

/// A GA4GH dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub id: String,
    pub name: Option<String>,
}

/// A named collection of variants within a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSet {
    pub id: String,
    pub dataset_id: String,
    pub name: Option<String>,
}
