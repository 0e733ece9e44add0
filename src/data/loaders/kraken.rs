// kraken.rs - Kraken2 report loader

use super::coerce_count;
use crate::data::records::TaxonRecord;
use crate::error::{Result, SummaryError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Positional columns of a Kraken2 report with minimizer data:
/// pct, clade reads, taxon reads, minimizers, distinct minimizers, rank, taxid, name
pub const KRAKEN_COLUMNS: usize = 8;

/// Load one Kraken2 report (no header row).
///
/// An empty file is a valid report with no rows. The report's own percentage
/// column is discarded. Extra trailing columns are ignored; a row with fewer
/// than [`KRAKEN_COLUMNS`] fields fails the whole report.
pub fn load_kraken_report(path: &Path) -> Result<Vec<TaxonRecord>> {
    let file =
        File::open(path).map_err(|e| SummaryError::io("Failed to open Kraken2 report", path, e))?;
    let reader = BufReader::new(file);
    let mut rows = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| SummaryError::io("Failed to read Kraken2 report", path, e))?;
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < KRAKEN_COLUMNS {
            return Err(SummaryError::MalformedReport {
                classifier: "Kraken2",
                path: path.to_path_buf(),
                reason: format!(
                    "line {} has {} columns, expected {}",
                    line_num + 1,
                    parts.len(),
                    KRAKEN_COLUMNS
                ),
            });
        }

        rows.push(TaxonRecord {
            pct_reads: 0.0,
            reads_clade: coerce_count(parts[1]),
            reads_taxon: coerce_count(parts[2]),
            minimizers_count: coerce_count(parts[3]),
            minimizers_distinct: coerce_count(parts[4]),
            rank: parts[5].trim().to_string(),
            tax_id: coerce_count(parts[6]),
            name: parts[7].trim().to_string(),
        });
    }

    Ok(rows)
}
