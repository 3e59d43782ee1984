//! SNP catalog entities.

use serde::Serialize;

use super::region::{GenomicRegion, same_chromosome};

/// One row of the SNP data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpRecord {
    pub id: String,
    pub chromosome: String,
    pub position: u64,
}

/// An (identifier, position) pair selected by a region filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnpLocation {
    pub id: String,
    pub position: u64,
}

/// In-memory SNP catalog loaded from the data file at startup.
///
/// Rows keep file order; filtering is a linear scan.
#[derive(Debug, Clone, Default)]
pub struct SnpCatalog {
    records: Vec<SnpRecord>,
}

impl SnpCatalog {
    pub fn new(records: Vec<SnpRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the locations on the region's chromosome strictly inside its
    /// bounds, in file order.
    pub fn filter(&self, region: &GenomicRegion) -> Vec<SnpLocation> {
        self.records
            .iter()
            .filter(|r| region.matches_chromosome(&r.chromosome))
            .filter(|r| region.strictly_contains(r.position))
            .map(|r| SnpLocation {
                id: r.id.clone(),
                position: r.position,
            })
            .collect()
    }

    /// Returns the identifiers recorded at exactly `chromosome:position`.
    pub fn ids_at(&self, chromosome: &str, position: u64) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.position == position && same_chromosome(&r.chromosome, chromosome))
            .map(|r| r.id.as_str())
            .collect()
    }
}
