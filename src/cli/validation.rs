// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::core::RunOptions;
use crate::data::SamplePaths;
use crate::error::{Result, SummaryError};
use std::path::{Path, PathBuf};

pub struct ValidationResult {
    pub paths: SamplePaths,
    pub options: RunOptions,
}

fn required<'a>(value: &'a Option<String>, parameter: &'static str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or(SummaryError::MissingParameter(parameter))
}

fn existing_dir(value: &str, label: &str) -> Result<PathBuf> {
    let path = PathBuf::from(value);
    if !path.is_dir() {
        return Err(SummaryError::MissingDirectory {
            label: label.to_string(),
            path,
        });
    }
    Ok(path)
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult> {
    let filter_stats_dir = required(&args.filter_stats_dir, "filter-stats-dir")?;
    let classification_stats_dir =
        required(&args.classification_stats_dir, "classification-stats-dir")?;
    let results_dir = required(&args.results_dir, "results-dir")?;
    let sample_id = required(&args.sample_id, "sample-id")?;

    if sample_id.contains(['/', '\\']) {
        return Err(SummaryError::InvalidParameter {
            parameter: "sample-id".to_string(),
            reason: format!("'{}' must not contain a path separator", sample_id),
        });
    }

    let paired_end_factor = args.effective_paired_end_factor();
    if paired_end_factor == 0 {
        return Err(SummaryError::InvalidParameter {
            parameter: "paired-end-factor".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let filter_stats_dir = existing_dir(filter_stats_dir, "filter-stats dir")?;
    let classification_stats_dir =
        existing_dir(classification_stats_dir, "classification-stats dir")?;

    Ok(ValidationResult {
        paths: SamplePaths::new(
            &filter_stats_dir,
            &classification_stats_dir,
            Path::new(results_dir),
            sample_id,
        ),
        options: RunOptions {
            paired_end_factor,
            dry_run: args.dry_run,
        },
    })
}
