// pipeline.rs - Per-sample summarize run

use crate::core::filtering::{filtering_summary, PRIMARY_READS};
use crate::core::kraken::{kraken_totals, merge_kraken_reports, PAIRED_END_FACTOR};
use crate::core::metaphlan::metaphlan_totals;
use crate::core::normalize::{normalize_kraken, normalize_metaphlan};
use crate::core::summary::compose_summary_row;
use crate::data::loaders::load_metaphlan_report;
use crate::data::{CounterSet, MetaphlanReport, SamplePaths, TaxonRecord};
use crate::error::Result;
use crate::output::{write_kraken_table, write_metaphlan_table, write_summary};
use log::{debug, info, warn};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Multiplier applied to Kraken2 read counts before merging
    pub paired_end_factor: u64,
    /// Compute everything but write nothing
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            paired_end_factor: PAIRED_END_FACTOR,
            dry_run: false,
        }
    }
}

/// What one run produced
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOutcome {
    pub summary: CounterSet,
    pub summary_written: Option<PathBuf>,
    pub kraken_written: Option<PathBuf>,
    pub metaphlan_written: Option<PathBuf>,
}

fn load_kraken(paths: &SamplePaths, factor: u64) -> Option<Vec<TaxonRecord>> {
    match merge_kraken_reports(&paths.kraken_paired, &paths.kraken_unpaired, factor) {
        Ok(table) => table,
        Err(e) => {
            warn!("Skipping Kraken2 outputs: {}", e);
            None
        }
    }
}

fn load_metaphlan(paths: &SamplePaths) -> Option<MetaphlanReport> {
    if !paths.metaphlan.is_file() {
        debug!("MetaPhlAn report not present: {}", paths.metaphlan.display());
        return None;
    }
    match load_metaphlan_report(&paths.metaphlan) {
        Ok(report) => {
            info!(
                "MetaPhlAn report loaded: {} ({} clades)",
                paths.metaphlan.display(),
                report.clades.len()
            );
            Some(report)
        }
        Err(e) => {
            warn!("Skipping MetaPhlAn outputs: {}", e);
            None
        }
    }
}

/// Run the whole summarize step for one sample.
///
/// Missing or malformed inputs degrade to zeros or absent sections. Only a
/// failure to write the summary file itself is an error.
pub fn run_sample(paths: &SamplePaths, options: &RunOptions) -> Result<SampleOutcome> {
    info!("[summarize] sample {}", paths.sample_id);

    let filtering = filtering_summary(paths);
    let primary_reads = filtering.get(PRIMARY_READS).unwrap_or(0);

    let (kraken, metaphlan) = rayon::join(
        || load_kraken(paths, options.paired_end_factor),
        || load_metaphlan(paths),
    );

    let mut classification = CounterSet::new();
    if let Some(table) = &kraken {
        classification = classification.union(&kraken_totals(table).to_counters());
    }
    if let Some(report) = &metaphlan {
        classification = classification.union(&metaphlan_totals(report).to_counters());
    }

    let summary = compose_summary_row(&filtering, &classification);

    let mut outcome = SampleOutcome {
        summary,
        summary_written: None,
        kraken_written: None,
        metaphlan_written: None,
    };

    if options.dry_run {
        info!("[summarize] dry run, no files written");
        return Ok(outcome);
    }

    write_summary(&paths.summary_out, &paths.sample_id, &outcome.summary)?;
    outcome.summary_written = Some(paths.summary_out.clone());

    if primary_reads == 0 {
        if kraken.is_some() || metaphlan.is_some() {
            warn!("PRIMARY_READS <= 0; skipping normalization outputs.");
        }
        return Ok(outcome);
    }

    if let Some(rows) = kraken.as_deref().and_then(|t| normalize_kraken(t, primary_reads)) {
        match write_kraken_table(&paths.kraken_out, &rows) {
            Ok(()) => outcome.kraken_written = Some(paths.kraken_out.clone()),
            Err(e) => warn!("Could not write Kraken2 table: {}", e),
        }
    }

    if let Some(rows) = metaphlan
        .as_ref()
        .and_then(|r| normalize_metaphlan(&r.clades, primary_reads))
    {
        match write_metaphlan_table(&paths.metaphlan_out, &rows) {
            Ok(()) => outcome.metaphlan_written = Some(paths.metaphlan_out.clone()),
            Err(e) => warn!("Could not write MetaPhlAn table: {}", e),
        }
    }

    Ok(outcome)
}
