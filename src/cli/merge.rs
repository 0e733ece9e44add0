// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::error::Result;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.filter_stats_dir.is_none() {
            self.filter_stats_dir = config.filter_stats_dir;
        }
        if self.classification_stats_dir.is_none() {
            self.classification_stats_dir = config.classification_stats_dir;
        }
        if self.results_dir.is_none() {
            self.results_dir = config.results_dir;
        }
        if self.sample_id.is_none() {
            self.sample_id = config.sample_id;
        }

        // Counting
        if self.paired_end_factor.is_none() {
            self.paired_end_factor = config.paired_end_factor;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags
        if !self.verbose && config.verbose.unwrap_or(false) {
            self.verbose = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
