//! GA4GH search request and response bodies.
//!
//! Servers differ in how they encode int64 fields (number or string) and in
//! how variant metadata is shaped (0.5 `info` map or 0.6 `attributes`), so
//! decoding is lenient and normalised into domain entities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::domain::entities::{Dataset, Variant, VariantSet};

/// Page size requested on every search.
pub const PAGE_SIZE: u32 = 100;

/// Responses that may continue on another page.
pub trait Paged {
    fn next_page_token(&self) -> Option<&str>;
}

fn next_token(token: &Option<String>) -> Option<&str> {
    token.as_deref().filter(|t| !t.is_empty())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDatasetsRequest {
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVariantSetsRequest {
    pub dataset_id: String,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVariantsRequest {
    pub variant_set_id: String,
    pub reference_name: String,
    pub start: u64,
    pub end: u64,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDatasetsResponse {
    #[serde(default)]
    pub datasets: Vec<WireDataset>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Paged for SearchDatasetsResponse {
    fn next_page_token(&self) -> Option<&str> {
        next_token(&self.next_page_token)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVariantSetsResponse {
    #[serde(default)]
    pub variant_sets: Vec<WireVariantSet>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Paged for SearchVariantSetsResponse {
    fn next_page_token(&self) -> Option<&str> {
        next_token(&self.next_page_token)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVariantsResponse {
    #[serde(default)]
    pub variants: Vec<WireVariant>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Paged for SearchVariantsResponse {
    fn next_page_token(&self) -> Option<&str> {
        next_token(&self.next_page_token)
    }
}

#[derive(Debug, Deserialize)]
pub struct WireDataset {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<WireDataset> for Dataset {
    fn from(w: WireDataset) -> Self {
        Dataset {
            id: w.id,
            name: w.name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireVariantSet {
    pub id: String,
    #[serde(default)]
    pub dataset_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<WireVariantSet> for VariantSet {
    fn from(w: WireVariantSet) -> Self {
        VariantSet {
            id: w.id,
            dataset_id: w.dataset_id,
            name: w.name,
        }
    }
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireVariant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub variant_set_id: String,
    #[serde(default)]
    pub names: Vec<String>,
    pub reference_name: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub start: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub end: u64,
    #[serde(default)]
    pub reference_bases: String,
    #[serde(default)]
    pub alternate_bases: Vec<String>,
    #[serde(default)]
    pub info: BTreeMap<String, Vec<Value>>,
    #[serde(default)]
    pub attributes: Option<Attributes>,
}

/// GA4GH 0.6 attribute container: `{"attr": {"key": {"values": [...]}}}`.
#[derive(Debug, Default, Deserialize)]
pub struct Attributes {
    #[serde(default)]
    pub attr: BTreeMap<String, AttributeValues>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AttributeValues {
    #[serde(default)]
    pub values: Vec<Value>,
}

impl From<WireVariant> for Variant {
    fn from(w: WireVariant) -> Self {
        let mut info: BTreeMap<String, Vec<String>> = w
            .info
            .into_iter()
            .map(|(key, values)| (key, values.iter().map(value_text).collect()))
            .collect();

        if let Some(attributes) = w.attributes {
            for (key, entry) in attributes.attr {
                info.entry(key)
                    .or_default()
                    .extend(entry.values.iter().map(value_text));
            }
        }

        Variant {
            id: w.id,
            variant_set_id: w.variant_set_id,
            names: w.names,
            reference_name: w.reference_name,
            start: w.start,
            end: w.end,
            reference_bases: w.reference_bases,
            alternate_bases: w.alternate_bases,
            info,
        }
    }
}

/// Renders a metadata value as text.
///
/// Plain strings are taken as-is; GA4GH 0.6 typed values
/// (`{"stringValue": "x"}`, `{"int64Value": 3}`) are unwrapped; anything else
/// is rendered as compact JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(obj) if obj.len() == 1 => match obj.values().next() {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variant_with_string_positions_and_info() {
        let wire: WireVariant = serde_json::from_value(json!({
            "id": "v1",
            "variantSetId": "brca-hg37",
            "names": ["NM_000059.3:c.-40+1G>A"],
            "referenceName": "13",
            "start": "32889616",
            "end": "32889617",
            "referenceBases": "G",
            "alternateBases": ["A"],
            "info": {"Pathogenicity_expert": ["Not Yet Reviewed"]}
        }))
        .unwrap();

        let variant = Variant::from(wire);
        assert_eq!(variant.start, 32_889_616);
        assert_eq!(variant.end, 32_889_617);
        assert_eq!(variant.info["Pathogenicity_expert"], vec!["Not Yet Reviewed"]);
    }

    #[test]
    fn test_variant_with_numeric_positions_and_attributes() {
        let wire: WireVariant = serde_json::from_value(json!({
            "referenceName": "13",
            "start": 100,
            "end": 101,
            "attributes": {"attr": {
                "Gene_symbol": {"values": [{"stringValue": "BRCA2"}]},
                "Allele_count": {"values": [{"int32Value": 3}]}
            }}
        }))
        .unwrap();

        let variant = Variant::from(wire);
        assert_eq!(variant.start, 100);
        assert_eq!(variant.info["Gene_symbol"], vec!["BRCA2"]);
        assert_eq!(variant.info["Allele_count"], vec!["3"]);
        assert!(variant.alternate_bases.is_empty());
    }

    #[test]
    fn test_empty_page_token_ends_pagination() {
        let page: SearchVariantsResponse =
            serde_json::from_value(json!({"variants": [], "nextPageToken": ""})).unwrap();
        assert!(page.next_page_token().is_none());
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let body = serde_json::to_value(SearchVariantsRequest {
            variant_set_id: "brca-hg37".into(),
            reference_name: "13".into(),
            start: 1,
            end: 2,
            page_size: PAGE_SIZE,
            page_token: None,
        })
        .unwrap();

        assert_eq!(body["variantSetId"], "brca-hg37");
        assert_eq!(body["referenceName"], "13");
        assert!(body.get("pageToken").is_none());
    }
}
