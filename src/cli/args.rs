// args.rs - Command line arguments definition

use crate::core::PAIRED_END_FACTOR;
use argh::FromArgs;

#[derive(FromArgs, Debug)]
/// pst2t-summarize - Per-sample filtering and classification summary
pub struct Args {
    /// directory holding the per-sample flagstat and filter-metrics files
    #[argh(option)]
    pub filter_stats_dir: Option<String>,

    /// directory holding the per-sample Kraken2 and MetaPhlAn4 reports
    #[argh(option)]
    pub classification_stats_dir: Option<String>,

    /// output directory for the summary and normalized tables
    #[argh(option)]
    pub results_dir: Option<String>,

    /// sample identifier used as the file-name prefix
    #[argh(option)]
    pub sample_id: Option<String>,

    /// multiplier applied to Kraken2 read counts (default: 2)
    #[argh(option)]
    pub paired_end_factor: Option<u64>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// compute everything but write no files
    #[argh(switch)]
    pub dry_run: bool,

    /// verbose logging
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

impl Args {
    /// Paired-end factor after CLI and config, falling back to the default
    pub fn effective_paired_end_factor(&self) -> u64 {
        self.paired_end_factor.unwrap_or(PAIRED_END_FACTOR)
    }
}
