// mod.rs - TSV output writers

use crate::core::normalize::{KrakenRpmRow, MetaphlanRpmRow, KRAKEN_RPM_COLUMNS, METAPHLAN_RPM_COLUMNS};
use crate::data::CounterSet;
use crate::error::{Result, SummaryError};
use log::info;
use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::path::Path;

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)
                .map_err(|e| SummaryError::io("Failed to create parent directory", parent, e))?;
        }
    }
    Ok(())
}

fn tsv_writer(file_path: &Path) -> Result<csv::Writer<File>> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| SummaryError::io("Failed to create output file", file_path, e))?;
    Ok(csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(file))
}

fn table_err(file_path: &Path) -> impl Fn(csv::Error) -> SummaryError + '_ {
    move |source| SummaryError::Table {
        path: file_path.to_path_buf(),
        source,
    }
}

/// Write a header line plus one line per serialized row.
///
/// The header is written explicitly so empty tables still carry their columns.
pub fn write_table<T: Serialize>(file_path: &Path, columns: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = tsv_writer(file_path)?;
    writer.write_record(columns).map_err(table_err(file_path))?;
    for row in rows {
        writer.serialize(row).map_err(table_err(file_path))?;
    }
    writer
        .flush()
        .map_err(|e| SummaryError::io("Failed to flush output file", file_path, e))?;
    Ok(())
}

/// Write the one-row sample summary: `sample_id` then every counter, in order
pub fn write_summary(file_path: &Path, sample_id: &str, row: &CounterSet) -> Result<()> {
    let mut writer = tsv_writer(file_path)?;

    let header: Vec<&str> = std::iter::once("sample_id").chain(row.keys()).collect();
    writer.write_record(&header).map_err(table_err(file_path))?;

    let values: Vec<String> = std::iter::once(sample_id.to_string())
        .chain(row.values().map(|v| v.to_string()))
        .collect();
    writer.write_record(&values).map_err(table_err(file_path))?;

    writer
        .flush()
        .map_err(|e| SummaryError::io("Failed to flush output file", file_path, e))?;
    info!("[summarize] wrote {}", file_path.display());
    Ok(())
}

pub fn write_kraken_table(file_path: &Path, rows: &[KrakenRpmRow]) -> Result<()> {
    write_table(file_path, &KRAKEN_RPM_COLUMNS, rows)?;
    info!("[summarize] wrote {} ({} taxa)", file_path.display(), rows.len());
    Ok(())
}

pub fn write_metaphlan_table(file_path: &Path, rows: &[MetaphlanRpmRow]) -> Result<()> {
    write_table(file_path, &METAPHLAN_RPM_COLUMNS, rows)?;
    info!("[summarize] wrote {} ({} clades)", file_path.display(), rows.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_summary_is_one_wide_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("S1.summary.tsv");
        let row: CounterSet = [("PRIMARY_READS", 100), ("TOTAL_READS_TESTED", 200)]
            .into_iter()
            .collect();

        write_summary(&path, "S1", &row).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "sample_id\tPRIMARY_READS\tTOTAL_READS_TESTED");
        assert_eq!(lines[1], "S1\t100\t200");
    }

    #[test]
    fn test_write_kraken_table_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("S1.kraken.txt");
        let rows = vec![KrakenRpmRow {
            name: "Homo sapiens".to_string(),
            tax_id: 9606,
            rank: "S".to_string(),
            reads_clade: 60,
            reads_taxon: 60,
            reads_clade_per_million: 600000.0,
            reads_taxon_per_million: 600000.0,
            pct_reads: 30.0,
        }];

        write_kraken_table(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], KRAKEN_RPM_COLUMNS.join("\t"));
        let fields: Vec<&str> = lines[1].split('\t').collect();
        assert_eq!(fields[0], "Homo sapiens");
        assert_eq!(fields[1], "9606");
        assert_eq!(fields[5].parse::<f64>().unwrap(), 600000.0);
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("S1.metaphlan.txt");
        write_metaphlan_table(&path, &[]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), METAPHLAN_RPM_COLUMNS.join("\t"));
    }
}
