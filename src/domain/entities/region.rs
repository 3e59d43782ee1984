//! Genomic region entity.

use serde::Serialize;
use serde_json::json;

use crate::error::AppError;

/// A half-open query window on one reference sequence.
///
/// `start` must be strictly less than `end`. Chromosome names are compared
/// without a leading `chr` prefix and ignoring case, so `13`, `chr13` and
/// `CHR13` all denote the same reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenomicRegion {
    pub reference_name: String,
    pub start: u64,
    pub end: u64,
}

impl GenomicRegion {
    /// Creates a region, rejecting empty names and empty or inverted ranges.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the reference name is blank or
    /// `start >= end`.
    pub fn new(reference_name: impl Into<String>, start: u64, end: u64) -> Result<Self, AppError> {
        let reference_name = reference_name.into().trim().to_string();

        if reference_name.is_empty() {
            return Err(AppError::bad_request(
                "Reference name must not be empty",
                json!({ "field": "reference_name" }),
            ));
        }

        if start >= end {
            return Err(AppError::bad_request(
                "Region start must be less than end",
                json!({ "start": start, "end": end }),
            ));
        }

        Ok(Self {
            reference_name,
            start,
            end,
        })
    }

    /// Whether `chromosome` names the same reference as this region.
    pub fn matches_chromosome(&self, chromosome: &str) -> bool {
        same_chromosome(&self.reference_name, chromosome)
    }

    /// Whether `position` lies strictly between `start` and `end`.
    pub fn strictly_contains(&self, position: u64) -> bool {
        self.start < position && position < self.end
    }
}

impl std::fmt::Display for GenomicRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.reference_name, self.start, self.end)
    }
}

/// Compares two chromosome names, ignoring a `chr` prefix and case.
pub fn same_chromosome(a: &str, b: &str) -> bool {
    strip_chr(a).eq_ignore_ascii_case(strip_chr(b))
}

fn strip_chr(name: &str) -> &str {
    let name = name.trim();
    match name.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("chr") => &name[3..],
        _ => name,
    }
}
