//! 23andMe genotype and account entities.

use serde::Serialize;
use serde_json::Value;

/// The user's allele call at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenotypeCall {
    pub location: String,
    pub call: String,
}

/// Calls belonging to one 23andMe profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenotypeProfile {
    pub profile_id: String,
    pub calls: Vec<GenotypeCall>,
}

/// A decoded `/1/genotype/` response together with the payload it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Genotypes {
    pub profiles: Vec<GenotypeProfile>,
    pub raw: Value,
}

impl Genotypes {
    /// Decodes a genotype payload.
    ///
    /// Two shapes are understood, either as a single object or an array of
    /// them:
    ///
    /// ```text
    /// {"id": "p1", "rs12913832": "AA", "rs3088053": "CT"}
    /// {"id": "p1", "genotypes": [{"location": "rs12913832", "call": "AA"}]}
    /// ```
    ///
    /// Entries that are neither shape are ignored. Calls within a profile are
    /// ordered by location for the flat shape and kept in order otherwise.
    pub fn from_payload(raw: Value) -> Self {
        let profiles = match &raw {
            Value::Array(items) => items.iter().filter_map(parse_profile).collect(),
            Value::Object(_) => parse_profile(&raw).into_iter().collect(),
            _ => Vec::new(),
        };

        Self { profiles, raw }
    }

    /// Iterates over every (profile id, call) pair.
    pub fn calls(&self) -> impl Iterator<Item = (&str, &GenotypeCall)> {
        self.profiles
            .iter()
            .flat_map(|p| p.calls.iter().map(move |c| (p.profile_id.as_str(), c)))
    }
}

fn parse_profile(value: &Value) -> Option<GenotypeProfile> {
    let obj = value.as_object()?;
    let profile_id = obj
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let calls = match obj.get("genotypes").and_then(Value::as_array) {
        Some(entries) => entries
            .iter()
            .filter_map(|entry| {
                Some(GenotypeCall {
                    location: entry.get("location")?.as_str()?.to_string(),
                    call: entry.get("call")?.as_str()?.to_string(),
                })
            })
            .collect(),
        None => {
            let mut calls: Vec<_> = obj
                .iter()
                .filter(|(key, _)| key.as_str() != "id")
                .filter_map(|(location, call)| {
                    Some(GenotypeCall {
                        location: location.clone(),
                        call: call.as_str()?.to_string(),
                    })
                })
                .collect();
            calls.sort_by(|a, b| a.location.cmp(&b.location));
            calls
        }
    };

    Some(GenotypeProfile { profile_id, calls })
}

/// A profile listed on a 23andMe account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountProfile {
    pub id: String,
    pub genotyped: bool,
}

/// The authenticated 23andMe account, from `/1/user/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TtamUser {
    pub id: String,
    pub profiles: Vec<AccountProfile>,
}
