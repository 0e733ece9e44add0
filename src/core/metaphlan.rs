// metaphlan.rs - MetaPhlAn4 classification totals

use crate::data::{CladeRecord, CounterSet, MetaphlanReport};

pub const BACTERIA_PREFIX: &str = "k__Bacteria";
pub const ARCHAEA_PREFIX: &str = "k__Archaea";

/// Key totals of one MetaPhlAn4 report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetaphlanTotals {
    pub total_reads: u64,
    pub classified_reads: u64,
    pub unclassified_reads: u64,
    pub bacterial_reads: u64,
    pub archaeal_reads: u64,
}

impl MetaphlanTotals {
    pub fn to_counters(&self) -> CounterSet {
        [
            ("TOTAL_READS_MPA", self.total_reads),
            ("CLASSIFIED_READS_MPA", self.classified_reads),
            ("UNCLASSIFIED_READS_MPA", self.unclassified_reads),
            ("BACTERIAL_READS_MPA", self.bacterial_reads),
            ("ARCHAEAL_READS_MPA", self.archaeal_reads),
        ]
        .into_iter()
        .collect()
    }
}

/// `total - classified`, floored at zero when upstream counts disagree
pub fn unclassified_reads(total: u64, classified: u64) -> u64 {
    total.saturating_sub(classified)
}

/// Sum of estimated reads over clades whose name starts with `prefix`
/// (case-sensitive), truncated to an integer.
pub fn sum_clade_reads(clades: &[CladeRecord], prefix: &str) -> u64 {
    let total: f64 = clades
        .iter()
        .filter(|c| c.clade_name.starts_with(prefix))
        .map(|c| c.estimated_number_of_reads_from_the_clade)
        .sum();
    if total.is_finite() && total > 0.0 {
        total.trunc() as u64
    } else {
        0
    }
}

pub fn metaphlan_totals(report: &MetaphlanReport) -> MetaphlanTotals {
    MetaphlanTotals {
        total_reads: report.reads_processed,
        classified_reads: report.reads_mapped,
        unclassified_reads: unclassified_reads(report.reads_processed, report.reads_mapped),
        bacterial_reads: sum_clade_reads(&report.clades, BACTERIA_PREFIX),
        archaeal_reads: sum_clade_reads(&report.clades, ARCHAEA_PREFIX),
    }
}
