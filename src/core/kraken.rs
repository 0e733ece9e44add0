// kraken.rs - Kraken2 paired/unpaired report merger

use crate::data::loaders::load_kraken_report;
use crate::data::{CounterSet, TaxonRecord};
use crate::error::Result;
use log::{debug, info};
use std::collections::BTreeMap;
use std::path::Path;

/// Multiplier applied to clade/taxon read counts of every Kraken2 report
/// before merging. Assumes the classifier reports each mate of a pair once;
/// validate against the Kraken2 version in use and override with
/// `--paired-end-factor` if it differs.
pub const PAIRED_END_FACTOR: u64 = 2;

pub const UNCLASSIFIED_TAX_ID: u64 = 0;
pub const ROOT_TAX_ID: u64 = 1;
pub const HUMAN_TAX_ID: u64 = 9606;
/// Bacteria, Fungi, Archaea, Viruses
pub const MICROBIAL_TAX_IDS: [u64; 4] = [2, 4751, 2157, 10239];

/// Decimal places kept on recomputed percentages
const PCT_DECIMALS: i32 = 4;

#[derive(Default)]
struct Accumulator {
    reads_clade: u64,
    reads_taxon: u64,
    minimizers_count: u64,
    minimizers_distinct: u64,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Sum of `reads_clade` over unclassified (0) and root (1) rows.
///
/// Every other taxon is a subset of root, so this is the classified-read total.
pub fn classified_denominator(table: &[TaxonRecord]) -> u64 {
    sum_clade_reads(table, |id| id == UNCLASSIFIED_TAX_ID || id == ROOT_TAX_ID)
}

fn sum_clade_reads(table: &[TaxonRecord], keep: impl Fn(u64) -> bool) -> u64 {
    table
        .iter()
        .filter(|r| keep(r.tax_id))
        .fold(0u64, |total, r| total.saturating_add(r.reads_clade))
}

/// Scale, concatenate, group and re-derive percentages.
///
/// Rows are grouped on (name, tax_id, rank) and come back ordered by that key.
/// `pct_reads` is recomputed against [`classified_denominator`] of the merged
/// table and rounded to 4 decimals; a zero denominator gives 0.0 everywhere.
pub fn merge_taxon_records(reports: &[Vec<TaxonRecord>], factor: u64) -> Vec<TaxonRecord> {
    let mut groups: BTreeMap<(String, u64, String), Accumulator> = BTreeMap::new();

    for row in reports.iter().flatten() {
        let acc = groups
            .entry((row.name.clone(), row.tax_id, row.rank.clone()))
            .or_default();
        // Counts come straight from the report; saturate rather than wrap
        acc.reads_clade = acc.reads_clade.saturating_add(row.reads_clade.saturating_mul(factor));
        acc.reads_taxon = acc.reads_taxon.saturating_add(row.reads_taxon.saturating_mul(factor));
        acc.minimizers_count = acc.minimizers_count.saturating_add(row.minimizers_count);
        acc.minimizers_distinct = acc.minimizers_distinct.saturating_add(row.minimizers_distinct);
    }

    let merged: Vec<TaxonRecord> = groups
        .into_iter()
        .map(|((name, tax_id, rank), acc)| TaxonRecord {
            pct_reads: 0.0,
            reads_clade: acc.reads_clade,
            reads_taxon: acc.reads_taxon,
            minimizers_count: acc.minimizers_count,
            minimizers_distinct: acc.minimizers_distinct,
            rank,
            tax_id,
            name,
        })
        .collect();

    let denominator = classified_denominator(&merged);
    merged
        .into_iter()
        .map(|row| {
            let pct_reads = if denominator > 0 {
                round_to(100.0 * row.reads_clade as f64 / denominator as f64, PCT_DECIMALS)
            } else {
                0.0
            };
            TaxonRecord { pct_reads, ..row }
        })
        .collect()
}

/// Load and merge the paired/unpaired Kraken2 reports of one sample.
///
/// `Ok(None)` when neither report exists. A malformed report is an error for
/// the whole classifier.
pub fn merge_kraken_reports(
    paired: &Path,
    unpaired: &Path,
    factor: u64,
) -> Result<Option<Vec<TaxonRecord>>> {
    let mut reports = Vec::with_capacity(2);
    for path in [paired, unpaired] {
        if path.is_file() {
            let rows = load_kraken_report(path)?;
            info!("Kraken2 report loaded: {} ({} rows)", path.display(), rows.len());
            reports.push(rows);
        } else {
            debug!("Kraken2 report not present: {}", path.display());
        }
    }

    if reports.is_empty() {
        return Ok(None);
    }
    Ok(Some(merge_taxon_records(&reports, factor)))
}

/// Key totals of a merged Kraken2 table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KrakenTotals {
    pub total_reads_tested: u64,
    pub unclassified: u64,
    pub classified: u64,
    pub microbial: u64,
    pub human: u64,
}

impl KrakenTotals {
    pub fn to_counters(&self) -> CounterSet {
        [
            ("TOTAL_READS_TESTED", self.total_reads_tested),
            ("UNCLASSIFIED_TOTAL_K2", self.unclassified),
            ("CLASSIFIED_TOTAL_K2", self.classified),
            ("MICROBIAL_TOTAL_K2", self.microbial),
            ("HUMAN_TOTAL_K2", self.human),
        ]
        .into_iter()
        .collect()
    }
}

pub fn kraken_totals(table: &[TaxonRecord]) -> KrakenTotals {
    KrakenTotals {
        total_reads_tested: classified_denominator(table),
        unclassified: sum_clade_reads(table, |id| id == UNCLASSIFIED_TAX_ID),
        classified: sum_clade_reads(table, |id| id == ROOT_TAX_ID),
        microbial: sum_clade_reads(table, |id| MICROBIAL_TAX_IDS.contains(&id)),
        human: sum_clade_reads(table, |id| id == HUMAN_TAX_ID),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, tax_id: u64, rank: &str, clade: u64, taxon: u64) -> TaxonRecord {
        TaxonRecord {
            pct_reads: 0.0,
            reads_clade: clade,
            reads_taxon: taxon,
            minimizers_count: 10,
            minimizers_distinct: 5,
            rank: rank.to_string(),
            tax_id,
            name: name.to_string(),
        }
    }

    fn sample_report() -> Vec<TaxonRecord> {
        vec![
            row("unclassified", 0, "U", 10, 10),
            row("root", 1, "R", 90, 2),
            row("Bacteria", 2, "D", 40, 1),
            row("Viruses", 10239, "D", 6, 0),
            row("Homo sapiens", 9606, "S", 30, 30),
        ]
    }

    fn by_key(table: &[TaxonRecord], tax_id: u64) -> &TaxonRecord {
        table.iter().find(|r| r.tax_id == tax_id).expect("taxon present")
    }

    #[test]
    fn test_counts_are_doubled() {
        let merged = merge_taxon_records(&[sample_report()], PAIRED_END_FACTOR);
        let root = by_key(&merged, 1);
        assert_eq!(root.reads_clade, 180);
        assert_eq!(root.reads_taxon, 4);
        // Minimizer counts are summed, not scaled
        assert_eq!(root.minimizers_count, 10);
    }

    #[test]
    fn test_duplicate_taxa_are_grouped() {
        let paired = vec![row("root", 1, "R", 50, 1), row("Bacteria", 2, "D", 20, 0)];
        let unpaired = vec![row("root", 1, "R", 40, 1), row("Bacteria", 2, "D", 20, 0)];
        let merged = merge_taxon_records(&[paired, unpaired], 2);
        assert_eq!(merged.len(), 2);
        assert_eq!(by_key(&merged, 1).reads_clade, 180);
        assert_eq!(by_key(&merged, 1).minimizers_count, 20);
        assert_eq!(by_key(&merged, 2).reads_clade, 80);
    }

    #[test]
    fn test_same_taxid_different_rank_stays_separate() {
        let merged = merge_taxon_records(
            &[vec![row("X", 5, "G", 1, 1), row("X", 5, "S", 1, 1)]],
            1,
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_split_reports_match_single_report() {
        // merge(paired = X) == merge(paired = half of X, unpaired = other half)
        let full = sample_report();
        let (first, second) = full.split_at(2);
        let whole = merge_taxon_records(&[full.clone()], PAIRED_END_FACTOR);
        let split = merge_taxon_records(&[first.to_vec(), second.to_vec()], PAIRED_END_FACTOR);
        assert_eq!(whole, split);

        // Same taxa with every count halved into each of the two files
        let even: Vec<TaxonRecord> = full
            .into_iter()
            .filter(|r| r.reads_clade % 2 == 0 && r.reads_taxon % 2 == 0)
            .collect();
        let halves: Vec<TaxonRecord> = even
            .iter()
            .map(|r| TaxonRecord {
                reads_clade: r.reads_clade / 2,
                reads_taxon: r.reads_taxon / 2,
                ..r.clone()
            })
            .collect();
        let from_whole = merge_taxon_records(&[even], PAIRED_END_FACTOR);
        let from_halves = merge_taxon_records(&[halves.clone(), halves], PAIRED_END_FACTOR);
        assert_eq!(from_whole.len(), from_halves.len());
        for (a, b) in from_whole.iter().zip(from_halves.iter()) {
            assert_eq!(a.reads_clade, b.reads_clade);
            assert_eq!(a.reads_taxon, b.reads_taxon);
            assert_eq!(a.pct_reads, b.pct_reads);
        }
    }

    #[test]
    fn test_pct_is_recomputed_and_rounded() {
        let mut report = sample_report();
        // Upstream percentages must be ignored
        report.iter_mut().for_each(|r| r.pct_reads = 55.5);
        let merged = merge_taxon_records(&[report], PAIRED_END_FACTOR);

        assert_eq!(by_key(&merged, 0).pct_reads, 10.0);
        assert_eq!(by_key(&merged, 1).pct_reads, 90.0);
        assert_eq!(by_key(&merged, 2).pct_reads, 40.0);

        let odd = merge_taxon_records(
            &[vec![row("unclassified", 0, "U", 0, 0), row("root", 1, "R", 3, 0), row("A", 7, "S", 1, 1)]],
            1,
        );
        assert_eq!(by_key(&odd, 7).pct_reads, 33.3333);
    }

    #[test]
    fn test_pct_bounds_and_root_pair() {
        let merged = merge_taxon_records(&[sample_report()], PAIRED_END_FACTOR);
        let denominator = classified_denominator(&merged);
        let root_pair: u64 = merged
            .iter()
            .filter(|r| r.tax_id <= 1)
            .map(|r| r.reads_clade)
            .sum();
        assert_eq!(root_pair, denominator);
        let root_pair_pct: f64 = merged.iter().filter(|r| r.tax_id <= 1).map(|r| r.pct_reads).sum();
        assert!((root_pair_pct - 100.0).abs() < 1e-9);
        assert!(merged.iter().all(|r| r.pct_reads <= 100.0));

        // Bacteria, Viruses and Homo sapiens are disjoint subsets of root
        let non_root: f64 = merged.iter().filter(|r| r.tax_id > 1).map(|r| r.pct_reads).sum();
        assert!(non_root <= 100.0 + 1e-9);
        assert!((non_root - 100.0 * 152.0 / 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let merged = merge_taxon_records(
            &[vec![row("root", 1, "R", u64::MAX, 0), row("unclassified", 0, "U", 10, 10)]],
            PAIRED_END_FACTOR,
        );
        assert_eq!(by_key(&merged, 1).reads_clade, u64::MAX);
        assert_eq!(classified_denominator(&merged), u64::MAX);
        assert!(merged.iter().all(|r| r.pct_reads.is_finite() && r.pct_reads <= 100.0));

        let merged = merge_taxon_records(&[vec![row("root", 1, "R", 90, 2)]], u64::MAX / 2);
        assert_eq!(by_key(&merged, 1).reads_clade, u64::MAX);
        assert_eq!(by_key(&merged, 1).reads_taxon, u64::MAX - 1);
    }

    #[test]
    fn test_zero_denominator_gives_zero_pct() {
        let merged = merge_taxon_records(&[vec![row("A", 7, "S", 12, 12)]], 2);
        assert_eq!(merged[0].pct_reads, 0.0);
        assert_eq!(merged[0].reads_clade, 24);
    }

    #[test]
    fn test_output_ordered_by_group_key() {
        let merged = merge_taxon_records(&[sample_report()], 1);
        let names: Vec<&str> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bacteria", "Homo sapiens", "Viruses", "root", "unclassified"]);
    }

    #[test]
    fn test_totals() {
        let merged = merge_taxon_records(&[sample_report()], PAIRED_END_FACTOR);
        let totals = kraken_totals(&merged);
        assert_eq!(totals.total_reads_tested, 200);
        assert_eq!(totals.unclassified, 20);
        assert_eq!(totals.classified, 180);
        assert_eq!(totals.microbial, 92);
        assert_eq!(totals.human, 60);

        let keys: Vec<String> = totals.to_counters().keys().map(String::from).collect();
        assert_eq!(
            keys,
            vec![
                "TOTAL_READS_TESTED",
                "UNCLASSIFIED_TOTAL_K2",
                "CLASSIFIED_TOTAL_K2",
                "MICROBIAL_TOTAL_K2",
                "HUMAN_TOTAL_K2"
            ]
        );
    }

    #[test]
    fn test_merge_reports_from_files() {
        use std::fs;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let paired = dir.path().join("s.paired.kraken.report.txt");
        let unpaired = dir.path().join("s.unpaired.kraken.report.txt");

        assert!(merge_kraken_reports(&paired, &unpaired, 2).unwrap().is_none());

        fs::write(&paired, "10.0\t10\t10\t0\t0\tU\t0\tunclassified\n90.0\t90\t0\t0\t0\tR\t1\troot\n").unwrap();
        let merged = merge_kraken_reports(&paired, &unpaired, 2).unwrap().unwrap();
        assert_eq!(kraken_totals(&merged).total_reads_tested, 200);

        fs::write(&unpaired, "").unwrap();
        let merged = merge_kraken_reports(&paired, &unpaired, 2).unwrap().unwrap();
        assert_eq!(kraken_totals(&merged).total_reads_tested, 200);

        fs::write(&unpaired, "bad\trow\n").unwrap();
        assert!(merge_kraken_reports(&paired, &unpaired, 2).is_err());
    }
}
