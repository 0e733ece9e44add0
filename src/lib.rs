// lib.rs - pst2t-summarize library root

//! # pst2t-summarize - Per-sample summary of host filtering and taxonomic classification
//!
//! This library gathers the read counts produced along a host-depletion and
//! classification pipeline for one sample and folds them into a single summary
//! row, plus reads-per-million tables for each classifier.
//!
//! ## Inputs
//!
//! - **Filtering stats**: `samtools flagstat` tables for the raw and T2T-split
//!   alignments, and filter-metrics tables for the unaligned/excluded stages
//! - **Kraken2**: paired and unpaired reports, merged into one table
//! - **MetaPhlAn4**: a profile report with its `#` header block
//!
//! Every input is optional. Missing files become zeros (filtering) or absent
//! sections (classifiers).
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use pst2t_summarize::prelude::*;
//! use std::path::Path;
//!
//! let paths = SamplePaths::new(
//!     Path::new("filter_stats"),
//!     Path::new("classification_stats"),
//!     Path::new("results"),
//!     "SAMPLE01",
//! );
//! let outcome = run_sample(&paths, &RunOptions::default())?;
//! println!("{:?}", outcome.summary.get("PRIMARY_READS"));
//! # Ok::<(), SummaryError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, Config, ValidationResult};
    pub use crate::core::{compose_summary_row, filtering_summary, merge_kraken_reports, run_sample};
    pub use crate::core::{RunOptions, SampleOutcome};
    pub use crate::data::{CounterSet, MetaphlanReport, SamplePaths, TaxonRecord};
    pub use crate::error::{Result, SummaryError};
}

// Re-export main types at the root level for convenience
pub use crate::cli::{Args, ValidationResult};
pub use crate::core::{RunOptions, SampleOutcome};
pub use crate::data::{CounterSet, SamplePaths};
pub use crate::error::{Result, SummaryError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "pst2t-summarize v{} - Per-sample filtering and classification summary",
        VERSION
    )
}
