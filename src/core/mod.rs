// mod.rs - Core merge-and-normalize logic

pub mod filtering;
pub mod kraken;
pub mod metaphlan;
pub mod normalize;
pub mod pipeline;
pub mod summary;

// Re-export main types for convenience
pub use filtering::{build_filtering_summary, filtering_summary, PrimaryReadCounts, StageMetrics};
pub use kraken::{kraken_totals, merge_kraken_reports, merge_taxon_records, KrakenTotals, PAIRED_END_FACTOR};
pub use metaphlan::{metaphlan_totals, MetaphlanTotals};
pub use normalize::{normalize_kraken, normalize_metaphlan, per_million, KrakenRpmRow, MetaphlanRpmRow};
pub use pipeline::{run_sample, RunOptions, SampleOutcome};
pub use summary::compose_summary_row;
