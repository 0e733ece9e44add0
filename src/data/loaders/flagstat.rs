// flagstat.rs - samtools flagstat (TSV) extractor

use super::parse_digits;
use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Marker in column 3 of the line carrying the primary-read count
pub const PRIMARY_MARKER: &str = "primary";

/// Return the count on the `primary` line of a tab-separated flagstat file.
///
/// Expected line shape: `5995946\t0\tprimary`. `None` means the value was not
/// found (no such line, unreadable file, or a malformed count); it is never
/// collapsed to zero here.
pub fn parse_flagstat_primary(path: &Path) -> Option<u64> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!("Could not read flagstat file: {} ({})", path.display(), e);
            return None;
        }
    };

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("Could not read flagstat file: {} ({})", path.display(), e);
                return None;
            }
        };

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() >= 3 && parts[2].trim() == PRIMARY_MARKER {
            if let Some(value) = parse_digits(parts[0]) {
                return Some(value);
            }
        }
    }
    None
}
