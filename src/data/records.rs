// records.rs - Typed rows parsed from upstream reports

/// Counter columns of a PathSeq filter-metrics table, in output order.
pub const FILTER_METRIC_FIELDS: [&str; 8] = [
    "PRIMARY_READS",
    "READS_AFTER_PREALIGNED_HOST_FILTER",
    "READS_AFTER_QUALITY_AND_COMPLEXITY_FILTER",
    "READS_AFTER_HOST_FILTER",
    "READS_AFTER_DEDUPLICATION",
    "FINAL_PAIRED_READS",
    "FINAL_UNPAIRED_READS",
    "FINAL_TOTAL_READS",
];

/// The eight counters of one filter-metrics table, indexed like [`FILTER_METRIC_FIELDS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterMetrics {
    pub counts: [u64; 8],
}

impl FilterMetrics {
    pub fn get(&self, field: &str) -> Option<u64> {
        FILTER_METRIC_FIELDS
            .iter()
            .position(|f| *f == field)
            .map(|i| self.counts[i])
    }

    /// (field name, value) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        FILTER_METRIC_FIELDS.iter().copied().zip(self.counts.iter().copied())
    }

    /// Elementwise sum of two stages
    pub fn sum(&self, other: &FilterMetrics) -> FilterMetrics {
        let mut counts = [0u64; 8];
        for (i, slot) in counts.iter_mut().enumerate() {
            *slot = self.counts[i].saturating_add(other.counts[i]);
        }
        FilterMetrics { counts }
    }
}

/// One Kraken2 report row after typed coercion.
///
/// `pct_reads` is only meaningful on merged tables; parsed rows carry 0.0
/// because the upstream percentage is relative to a per-file total.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonRecord {
    pub pct_reads: f64,
    pub reads_clade: u64,
    pub reads_taxon: u64,
    pub minimizers_count: u64,
    pub minimizers_distinct: u64,
    pub rank: String,
    pub tax_id: u64,
    pub name: String,
}

/// One MetaPhlAn4 abundance row.
#[derive(Debug, Clone, PartialEq)]
pub struct CladeRecord {
    pub clade_name: String,
    /// Kept verbatim; lineage rows carry pipe-joined ids such as `2|1224`.
    /// Deliberately not coerced to an integer: a numeric cast would collapse
    /// every lineage id to a -1 placeholder in the output table.
    pub clade_taxid: String,
    pub relative_abundance: f64,
    pub coverage: f64,
    pub estimated_number_of_reads_from_the_clade: f64,
}

/// Parsed MetaPhlAn4 report: header scalars plus the clade table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaphlanReport {
    pub reads_processed: u64,
    pub reads_mapped: u64,
    pub clades: Vec<CladeRecord>,
}
