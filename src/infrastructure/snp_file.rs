//! Loader for the 23andMe SNP data file.
//!
//! The file is tab-separated with `#` comment lines and one header row:
//!
//! ```text
//! # 23andMe SNP list
//! index	snp	chromosome	chromosome_position
//! 0	rs12913832	15	28365618
//! ```
//!
//! Columns are read by position so header naming does not matter.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::domain::entities::{SnpCatalog, SnpRecord};

const ID_COLUMN: usize = 1;
const CHROMOSOME_COLUMN: usize = 2;
const POSITION_COLUMN: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot open SNP data file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed SNP data: {0}")]
    Csv(#[from] csv::Error),
}

/// Loads the SNP catalog from `path`.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be opened and
/// [`CatalogError::Csv`] if it is not readable as tab-separated text.
pub fn load_catalog(path: &Path) -> Result<SnpCatalog, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let catalog = parse_catalog(file)?;
    tracing::info!(path = %path.display(), snps = catalog.len(), "SNP catalog loaded");
    Ok(catalog)
}

/// Parses SNP rows from any reader.
///
/// Rows with fewer than four columns or a non-numeric position are skipped;
/// the number skipped is logged once.
pub fn parse_catalog<R: Read>(reader: R) -> Result<SnpCatalog, CatalogError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = row?;
        match parse_row(&row) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped malformed SNP rows");
    }

    Ok(SnpCatalog::new(records))
}

fn parse_row(row: &csv::StringRecord) -> Option<SnpRecord> {
    let id = row.get(ID_COLUMN).filter(|s| !s.is_empty())?;
    let chromosome = row.get(CHROMOSOME_COLUMN).filter(|s| !s.is_empty())?;
    let position = row.get(POSITION_COLUMN)?.parse().ok()?;

    Some(SnpRecord {
        id: id.to_string(),
        chromosome: chromosome.to_string(),
        position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::GenomicRegion;

    const SAMPLE: &str = "\
# comment line
# another comment
index\tsnp\tchromosome\tchromosome_position
0\trs1\t13\t100
1\trs2\t13\t150
2\trs3\t13\tnot-a-number
3\trs4
4\ti5\t1\t150
";

    #[test]
    fn test_skips_comments_header_and_malformed_rows() {
        let catalog = parse_catalog(SAMPLE.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_parsed_rows_are_filterable() {
        let catalog = parse_catalog(SAMPLE.as_bytes()).unwrap();
        let region = GenomicRegion::new("13", 100, 151).unwrap();

        let ids: Vec<_> = catalog.filter(&region).into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["rs2"]);
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let catalog = parse_catalog("index\tsnp\tchromosome\tchromosome_position\n".as_bytes())
            .unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog(Path::new("/definitely/not/here.data")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
