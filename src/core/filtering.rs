// filtering.rs - Filtering summary builder (flagstats + PathSeq filter metrics)

use crate::data::loaders::{parse_flagstat_primary, read_filter_metrics};
use crate::data::{CounterSet, FilterMetrics, SamplePaths, FILTER_METRIC_FIELDS};
use log::debug;
use std::path::Path;

pub const PRIMARY_READS: &str = "PRIMARY_READS";
pub const T2T_UNALIGNED_TOTAL_READS: &str = "T2T_UNALIGNED_TOTAL_READS";
pub const T2T_ALIGNED_PAIRED_PRIMARY: &str = "T2T_ALIGNED_PAIRED_PRIMARY";
pub const T2T_UNALIGNED_PAIRED_PRIMARY: &str = "T2T_UNALIGNED_PAIRED_PRIMARY";
pub const T2T_ALIGNED_UNPAIRED_PRIMARY: &str = "T2T_ALIGNED_UNPAIRED_PRIMARY";
pub const T2T_UNALIGNED_UNPAIRED_PRIMARY: &str = "T2T_UNALIGNED_UNPAIRED_PRIMARY";

/// Stage prefixes in output order
pub const STAGE_QCFILTER: &str = "QCFILTER";
pub const STAGE_UNALIGNED: &str = "UNALIGNED";
pub const STAGE_EXCLUDED: &str = "EXCLUDED";

/// Flagstat primary counts; `None` = not found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimaryReadCounts {
    pub primary: Option<u64>,
    pub aligned_paired: Option<u64>,
    pub unaligned_paired: Option<u64>,
    pub aligned_unpaired: Option<u64>,
    pub unaligned_unpaired: Option<u64>,
}

/// Filter-metrics tables of the two filtering stages; `None` = absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageMetrics {
    pub unaligned: Option<FilterMetrics>,
    pub excluded: Option<FilterMetrics>,
}

fn flagstat_if_present(path: &Path) -> Option<u64> {
    if !path.is_file() {
        debug!("Flagstat not present: {}", path.display());
        return None;
    }
    parse_flagstat_primary(path)
}

pub fn collect_primary_reads(paths: &SamplePaths) -> PrimaryReadCounts {
    PrimaryReadCounts {
        primary: flagstat_if_present(&paths.flagstat),
        aligned_paired: flagstat_if_present(&paths.t2t_aligned_paired),
        unaligned_paired: flagstat_if_present(&paths.t2t_unaligned_paired),
        aligned_unpaired: flagstat_if_present(&paths.t2t_aligned_unpaired),
        unaligned_unpaired: flagstat_if_present(&paths.t2t_unaligned_unpaired),
    }
}

pub fn collect_stage_metrics(paths: &SamplePaths) -> StageMetrics {
    StageMetrics {
        unaligned: read_filter_metrics(&paths.unaligned_metrics),
        excluded: read_filter_metrics(&paths.excluded_metrics),
    }
}

fn push_stage(set: &mut CounterSet, stage: &str, metrics: &FilterMetrics) {
    for (field, value) in metrics.iter() {
        set.insert(format!("{}_{}", stage, field), value);
    }
}

/// Compose the ordered filtering counter set.
///
/// This is the one place where "not found" becomes 0.
pub fn build_filtering_summary(primary: &PrimaryReadCounts, stages: &StageMetrics) -> CounterSet {
    let unaligned = stages.unaligned.unwrap_or_default();
    let excluded = stages.excluded.unwrap_or_default();
    let qcfilter = unaligned.sum(&excluded);

    let unaligned_paired = primary.unaligned_paired.unwrap_or(0);
    let unaligned_unpaired = primary.unaligned_unpaired.unwrap_or(0);

    let mut set = CounterSet::new();
    set.insert(PRIMARY_READS, primary.primary.unwrap_or(0));
    push_stage(&mut set, STAGE_QCFILTER, &qcfilter);
    push_stage(&mut set, STAGE_UNALIGNED, &unaligned);
    push_stage(&mut set, STAGE_EXCLUDED, &excluded);
    set.insert(T2T_UNALIGNED_TOTAL_READS, unaligned_paired.saturating_add(unaligned_unpaired));
    set.insert(T2T_ALIGNED_PAIRED_PRIMARY, primary.aligned_paired.unwrap_or(0));
    set.insert(T2T_UNALIGNED_PAIRED_PRIMARY, unaligned_paired);
    set.insert(T2T_ALIGNED_UNPAIRED_PRIMARY, primary.aligned_unpaired.unwrap_or(0));
    set.insert(T2T_UNALIGNED_UNPAIRED_PRIMARY, unaligned_unpaired);
    set
}

/// Read every filtering input of a sample and build its counter set
pub fn filtering_summary(paths: &SamplePaths) -> CounterSet {
    let primary = collect_primary_reads(paths);
    let stages = collect_stage_metrics(paths);
    debug!(
        "Filtering inputs for {}: primary={:?}, unaligned metrics={}, excluded metrics={}",
        paths.sample_id,
        primary.primary,
        stages.unaligned.is_some(),
        stages.excluded.is_some()
    );
    build_filtering_summary(&primary, &stages)
}

/// Number of keys in every filtering counter set
pub fn filtering_key_count() -> usize {
    1 + 3 * FILTER_METRIC_FIELDS.len() + 5
}
