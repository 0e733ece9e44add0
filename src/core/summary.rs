// summary.rs - Summary row composer

use crate::data::CounterSet;
use log::warn;

/// Union the filtering and classification counters into one row.
///
/// Filtering keys come first in their fixed order, then classification keys.
/// The two sets never share a key; should one appear twice the filtering value
/// wins.
pub fn compose_summary_row(filtering: &CounterSet, classification: &CounterSet) -> CounterSet {
    if classification.is_empty() {
        warn!("No classifier outputs found in classification-stats dir. Summary will only include filtering metrics.");
    }
    filtering.union(classification)
}
