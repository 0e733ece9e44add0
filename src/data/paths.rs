// paths.rs - Per-sample file naming conventions

use std::path::{Path, PathBuf};

/// Every input and output location for one sample.
///
/// File names follow the pipeline's fixed `<sample>.<suffix>` convention; none
/// of the inputs is required to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePaths {
    pub sample_id: String,

    // Filtering stats
    pub flagstat: PathBuf,
    pub t2t_aligned_paired: PathBuf,
    pub t2t_unaligned_paired: PathBuf,
    pub t2t_aligned_unpaired: PathBuf,
    pub t2t_unaligned_unpaired: PathBuf,
    pub unaligned_metrics: PathBuf,
    pub excluded_metrics: PathBuf,

    // Classifier reports
    pub kraken_paired: PathBuf,
    pub kraken_unpaired: PathBuf,
    pub metaphlan: PathBuf,

    // Outputs
    pub summary_out: PathBuf,
    pub kraken_out: PathBuf,
    pub metaphlan_out: PathBuf,
}

impl SamplePaths {
    pub fn new(
        filter_stats_dir: &Path,
        classification_stats_dir: &Path,
        results_dir: &Path,
        sample_id: &str,
    ) -> Self {
        let filt = |suffix: &str| filter_stats_dir.join(format!("{}.{}", sample_id, suffix));
        let class = |suffix: &str| classification_stats_dir.join(format!("{}.{}", sample_id, suffix));
        let out = |suffix: &str| results_dir.join(format!("{}.{}", sample_id, suffix));

        Self {
            sample_id: sample_id.to_string(),
            flagstat: filt("flagstat.tsv"),
            t2t_aligned_paired: filt("qcfilt_paired.t2t_aln.flagstat.tsv"),
            t2t_unaligned_paired: filt("qcfilt_paired.t2t_unaln.flagstat.tsv"),
            t2t_aligned_unpaired: filt("qcfilt_unpaired.t2t_aln.flagstat.tsv"),
            t2t_unaligned_unpaired: filt("qcfilt_unpaired.t2t_unaln.flagstat.tsv"),
            unaligned_metrics: filt("unaligned.filter_metrics.txt"),
            excluded_metrics: filt("excluded.filter_metrics.txt"),
            kraken_paired: class("paired.kraken.report.txt"),
            kraken_unpaired: class("unpaired.kraken.report.txt"),
            metaphlan: class("metaphlan.report.txt"),
            summary_out: out("summary.tsv"),
            kraken_out: out("kraken.txt"),
            metaphlan_out: out("metaphlan.txt"),
        }
    }
}
