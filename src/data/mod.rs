// mod.rs - Data structures module

pub mod counters;
pub mod loaders;
pub mod paths;
pub mod records;

// Re-export main types for convenience
pub use counters::CounterSet;
pub use paths::SamplePaths;
pub use records::{CladeRecord, FilterMetrics, MetaphlanReport, TaxonRecord, FILTER_METRIC_FIELDS};
