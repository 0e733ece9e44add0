// metaphlan.rs - MetaPhlAn4 profile loader

use super::{coerce_float, parse_digits};
use crate::data::records::{CladeRecord, MetaphlanReport};
use crate::error::{Result, SummaryError};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

/// clade_name, clade_taxid, relative_abundance, coverage, estimated reads
pub const METAPHLAN_COLUMNS: usize = 5;

fn reads_processed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d+)\s+reads\s+processed").expect("static regex"))
}

fn reads_mapped_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^#estimated_reads_mapped_to_known_clades:\s*(\d+)\s*$").expect("static regex")
    })
}

/// Header scalars from one comment line, as (reads processed, reads mapped)
fn scan_header_line(line: &str) -> (Option<u64>, Option<u64>) {
    let processed = reads_processed_re()
        .captures(line)
        .and_then(|c| parse_digits(&c[1]));
    let mapped = reads_mapped_re()
        .captures(line.trim_end())
        .and_then(|c| parse_digits(&c[1]));
    (processed, mapped)
}

/// Load a MetaPhlAn4 report.
///
/// Only the leading `#` block is scanned for the two header scalars; comment
/// lines further down are skipped. Missing scalars default to 0.
pub fn load_metaphlan_report(path: &Path) -> Result<MetaphlanReport> {
    let file = File::open(path)
        .map_err(|e| SummaryError::io("Failed to open MetaPhlAn report", path, e))?;
    let reader = BufReader::new(file);

    let mut report = MetaphlanReport::default();
    let mut in_header = true;

    for (line_num, line) in reader.lines().enumerate() {
        let line =
            line.map_err(|e| SummaryError::io("Failed to read MetaPhlAn report", path, e))?;

        if line.starts_with('#') {
            if in_header {
                let (processed, mapped) = scan_header_line(&line);
                if let Some(v) = processed {
                    report.reads_processed = v;
                }
                if let Some(v) = mapped {
                    report.reads_mapped = v;
                }
            }
            continue;
        }
        in_header = false;

        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < METAPHLAN_COLUMNS {
            return Err(SummaryError::MalformedReport {
                classifier: "MetaPhlAn",
                path: path.to_path_buf(),
                reason: format!(
                    "line {} has {} columns, expected {}",
                    line_num + 1,
                    parts.len(),
                    METAPHLAN_COLUMNS
                ),
            });
        }

        report.clades.push(CladeRecord {
            clade_name: parts[0].trim().to_string(),
            clade_taxid: parts[1].trim().to_string(),
            relative_abundance: coerce_float(parts[2]),
            coverage: coerce_float(parts[3]),
            estimated_number_of_reads_from_the_clade: coerce_float(parts[4]),
        });
    }

    Ok(report)
}
