// config.rs - Configuration file support

use crate::error::{Result, SummaryError};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub filter_stats_dir: Option<String>,
    pub classification_stats_dir: Option<String>,
    pub results_dir: Option<String>,
    pub sample_id: Option<String>,

    // Counting
    pub paired_end_factor: Option<u64>,

    // Performance
    pub threads: Option<usize>,

    // Flags
    pub verbose: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    ///
    /// Does not log: this runs before the logger is configured.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| SummaryError::io("Failed to read config file", path, e))?;

        let config: Config = toml::from_str(&content).map_err(|e| SummaryError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| SummaryError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        fs::write(path, content)
            .map_err(|e| SummaryError::io("Failed to write config file", path, e))?;

        info!("Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        format!(
            r#"# pst2t-summarize.toml - Configuration file for pst2t-summarize
# Generated: {}
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Directory with <sample>.flagstat.tsv, T2T flagstats and filter metrics
filter_stats_dir = "/path/to/filter_stats"

# Directory with <sample>.{{paired,unpaired}}.kraken.report.txt and <sample>.metaphlan.report.txt
classification_stats_dir = "/path/to/classification_stats"

# Output directory (created if missing)
results_dir = "results"

# Sample identifier
sample_id = "SAMPLE01"

# =============================================================================
# COUNTING
# =============================================================================

# Multiplier applied to Kraken2 read counts (reports count fragments, not mates)
paired_end_factor = 2

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 2

# =============================================================================
# FLAGS
# =============================================================================

# Verbose logging
verbose = false

# Compute everything but write no files
dry_run = false
"#,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_parses() {
        let sample = Config::generate_sample();
        let config: Config = toml::from_str(&sample).unwrap();
        assert_eq!(config.sample_id.as_deref(), Some("SAMPLE01"));
        assert_eq!(config.paired_end_factor, Some(2));
        assert_eq!(config.threads, None);
        assert_eq!(config.dry_run, Some(false));
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.toml");
        let config = Config {
            results_dir: Some("out".to_string()),
            paired_end_factor: Some(1),
            ..Config::new()
        };
        config.to_file(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_bad_config_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "paired_end_factor = \"two\"\n").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, SummaryError::Config { .. }));
    }
}
