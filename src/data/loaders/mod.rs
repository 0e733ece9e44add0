// mod.rs - Report loaders
//
// Every loader converts text cells to typed values exactly once, here at the
// parse boundary. Downstream code never sees raw strings for numeric columns.

pub mod filter_metrics;
pub mod flagstat;
pub mod kraken;
pub mod metaphlan;

pub use filter_metrics::read_filter_metrics;
pub use flagstat::parse_flagstat_primary;
pub use kraken::load_kraken_report;
pub use metaphlan::load_metaphlan_report;

/// Strict non-negative integer: ASCII digits only, no sign, no decimals
pub fn parse_digits(s: &str) -> Option<u64> {
    let cleaned = s.trim();
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    cleaned.parse::<u64>().ok()
}

/// Lenient count coercion: anything that is not a finite non-negative number becomes 0.
///
/// Integral floats such as `12.0` are accepted and truncated.
pub fn coerce_count(s: &str) -> u64 {
    if let Some(v) = parse_digits(s) {
        return v;
    }
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.trunc() as u64,
        _ => 0,
    }
}

/// Lenient float coercion: non-numeric or non-finite becomes 0.0
pub fn coerce_float(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
