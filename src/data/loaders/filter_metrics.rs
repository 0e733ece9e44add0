// filter_metrics.rs - PathSeq filter-metrics table extractor

use super::coerce_count;
use crate::data::records::{FilterMetrics, FILTER_METRIC_FIELDS};
use log::{debug, warn};
use std::path::Path;

/// Header field that identifies the metrics header row
pub const SENTINEL_FIELD: &str = "PRIMARY_READS";

/// Lines of preamble written ahead of the header by some PathSeq versions
pub const PREAMBLE_LINES: usize = 6;

/// Locates the header row; returns its line index
type HeaderStrategy = fn(&[&str]) -> Option<usize>;

/// Tried in order, first hit wins.
const HEADER_STRATEGIES: [(&str, HeaderStrategy); 3] = [
    ("first non-comment line", first_non_comment_line),
    ("fixed preamble", after_fixed_preamble),
    ("sentinel scan", sentinel_scan),
];

fn has_sentinel(line: &str) -> bool {
    line.split('\t').any(|field| field.trim() == SENTINEL_FIELD)
}

fn is_content(line: &str) -> bool {
    !line.trim().is_empty() && !line.starts_with('#')
}

fn data_row_after<'a>(lines: &[&'a str], header_idx: usize) -> Option<&'a str> {
    lines[header_idx + 1..].iter().copied().find(|l| is_content(l))
}

fn first_non_comment_line(lines: &[&str]) -> Option<usize> {
    let idx = lines.iter().position(|l| is_content(l))?;
    if has_sentinel(lines[idx]) && data_row_after(lines, idx).is_some() {
        Some(idx)
    } else {
        None
    }
}

fn after_fixed_preamble(lines: &[&str]) -> Option<usize> {
    let idx = lines
        .iter()
        .enumerate()
        .skip(PREAMBLE_LINES)
        .find(|(_, l)| !l.trim().is_empty())
        .map(|(i, _)| i)?;
    has_sentinel(lines[idx]).then_some(idx)
}

fn sentinel_scan(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|l| l.starts_with(SENTINEL_FIELD))
}

/// Extract the eight filter counters from table text.
///
/// Returns `None` when no strategy finds a header, or the header has no data row.
pub fn parse_filter_metrics(content: &str) -> Option<FilterMetrics> {
    let lines: Vec<&str> = content.lines().collect();

    let (strategy, header_idx) = HEADER_STRATEGIES
        .iter()
        .find_map(|(name, locate)| locate(lines.as_slice()).map(|idx| (*name, idx)))?;
    debug!("Filter metrics header at line {} ({})", header_idx + 1, strategy);

    let data = data_row_after(&lines, header_idx)?;
    let header: Vec<&str> = lines[header_idx].split('\t').map(str::trim).collect();
    let values: Vec<&str> = data.split('\t').collect();

    let mut counts = [0u64; 8];
    for (slot, field) in counts.iter_mut().zip(FILTER_METRIC_FIELDS.iter()) {
        *slot = header
            .iter()
            .position(|h| h == field)
            .and_then(|col| values.get(col))
            .map(|v| coerce_count(v))
            .unwrap_or(0);
    }
    Some(FilterMetrics { counts })
}

/// Read a PathSeq filter-metrics file.
///
/// A missing file is silently absent; an unreadable file or one without a
/// recognizable header logs a warning and is absent.
pub fn read_filter_metrics(path: &Path) -> Option<FilterMetrics> {
    if !path.is_file() {
        debug!("Filter metrics not present: {}", path.display());
        return None;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Could not parse PathSeq metrics: {} ({})", path.display(), e);
            return None;
        }
    };

    let metrics = parse_filter_metrics(&content);
    if metrics.is_none() {
        warn!(
            "Could not parse PathSeq metrics: {} (no {} header with data row)",
            path.display(),
            SENTINEL_FIELD
        );
    }
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "PRIMARY_READS\tREADS_AFTER_PREALIGNED_HOST_FILTER\tREADS_AFTER_QUALITY_AND_COMPLEXITY_FILTER\tREADS_AFTER_HOST_FILTER\tREADS_AFTER_DEDUPLICATION\tFINAL_PAIRED_READS\tFINAL_UNPAIRED_READS\tFINAL_TOTAL_READS";
    const DATA: &str = "1000\t900\t800\t700\t600\t400\t100\t500";
    const EXPECTED: [u64; 8] = [1000, 900, 800, 700, 600, 400, 100, 500];

    #[test]
    fn test_header_on_first_line() {
        let text = format!("{}\n{}\n", HEADER, DATA);
        assert_eq!(parse_filter_metrics(&text).unwrap().counts, EXPECTED);
    }

    #[test]
    fn test_header_after_comments() {
        let text = format!("## htsjdk.samtools.metrics.StringHeader\n# PathSeqFilterSpark\n\n{}\n{}\n", HEADER, DATA);
        assert_eq!(parse_filter_metrics(&text).unwrap().counts, EXPECTED);
    }

    #[test]
    fn test_header_after_fixed_preamble() {
        let text = format!(
            "line1\nline2\nline3\nline4\nline5\nline6\n{}\n{}\n",
            HEADER, DATA
        );
        assert_eq!(parse_filter_metrics(&text).unwrap().counts, EXPECTED);
    }

    #[test]
    fn test_header_location_independence() {
        let at_zero = parse_filter_metrics(&format!("{}\n{}\n", HEADER, DATA)).unwrap();
        for preamble in [1usize, 3, 6, 11] {
            let mut text = String::new();
            for i in 0..preamble {
                text.push_str(&format!("preamble {}\tjunk\n", i));
            }
            text.push_str(&format!("{}\n{}\n", HEADER, DATA));
            let found = parse_filter_metrics(&text)
                .unwrap_or_else(|| panic!("header not found at offset {}", preamble));
            assert_eq!(found, at_zero, "offset {}", preamble);
        }
    }

    #[test]
    fn test_non_numeric_and_missing_values_are_zero() {
        let text = format!("{}\n1000\tNA\t\t700.0\n", HEADER);
        let m = parse_filter_metrics(&text).unwrap();
        assert_eq!(m.counts, [1000, 0, 0, 700, 0, 0, 0, 0]);
    }

    #[test]
    fn test_column_order_follows_header() {
        let text = "FINAL_TOTAL_READS\tPRIMARY_READS\n5\t9\n";
        let m = parse_filter_metrics(text).unwrap();
        assert_eq!(m.get("PRIMARY_READS"), Some(9));
        assert_eq!(m.get("FINAL_TOTAL_READS"), Some(5));
        assert_eq!(m.get("FINAL_PAIRED_READS"), Some(0));
    }

    #[test]
    fn test_no_header_or_no_data() {
        assert!(parse_filter_metrics("a\tb\n1\t2\n").is_none());
        assert!(parse_filter_metrics(&format!("{}\n", HEADER)).is_none());
        assert!(parse_filter_metrics("").is_none());
    }

    #[test]
    fn test_read_filter_metrics_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s.unaligned.filter_metrics.txt");
        assert!(read_filter_metrics(&path).is_none());

        fs::write(&path, format!("# comment\n{}\n{}\n", HEADER, DATA)).unwrap();
        assert_eq!(read_filter_metrics(&path).unwrap().counts, EXPECTED);

        fs::write(&path, "garbage only\n").unwrap();
        assert!(read_filter_metrics(&path).is_none());
    }
}
