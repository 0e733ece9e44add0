// normalize.rs - Reads-per-million normalization

use crate::data::{CladeRecord, TaxonRecord};
use serde::Serialize;

pub const PER_MILLION: f64 = 1_000_000.0;

/// Output columns of the normalized Kraken2 table
pub const KRAKEN_RPM_COLUMNS: [&str; 8] = [
    "name",
    "tax_id",
    "rank",
    "reads_clade",
    "reads_taxon",
    "reads_clade_per_million",
    "reads_taxon_per_million",
    "pct_reads",
];

/// Output columns of the normalized MetaPhlAn4 table
pub const METAPHLAN_RPM_COLUMNS: [&str; 6] = [
    "clade_name",
    "clade_taxid",
    "estimated_number_of_reads_from_the_clade",
    "estimated_number_of_reads_from_the_clade_per_million",
    "relative_abundance",
    "coverage",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KrakenRpmRow {
    pub name: String,
    pub tax_id: u64,
    pub rank: String,
    pub reads_clade: u64,
    pub reads_taxon: u64,
    pub reads_clade_per_million: f64,
    pub reads_taxon_per_million: f64,
    pub pct_reads: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaphlanRpmRow {
    pub clade_name: String,
    pub clade_taxid: String,
    pub estimated_number_of_reads_from_the_clade: f64,
    pub estimated_number_of_reads_from_the_clade_per_million: f64,
    pub relative_abundance: f64,
    pub coverage: f64,
}

/// 1,000,000 × raw / denominator, or `None` for a zero denominator
pub fn per_million(raw: f64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(PER_MILLION * raw / denominator as f64)
    }
}

/// Normalized Kraken2 rows; `None` when the denominator is zero
pub fn normalize_kraken(table: &[TaxonRecord], denominator: u64) -> Option<Vec<KrakenRpmRow>> {
    if denominator == 0 {
        return None;
    }
    table
        .iter()
        .map(|r| {
            Some(KrakenRpmRow {
                name: r.name.clone(),
                tax_id: r.tax_id,
                rank: r.rank.clone(),
                reads_clade: r.reads_clade,
                reads_taxon: r.reads_taxon,
                reads_clade_per_million: per_million(r.reads_clade as f64, denominator)?,
                reads_taxon_per_million: per_million(r.reads_taxon as f64, denominator)?,
                pct_reads: r.pct_reads,
            })
        })
        .collect()
}

/// Normalized MetaPhlAn4 rows; `None` when the denominator is zero
pub fn normalize_metaphlan(clades: &[CladeRecord], denominator: u64) -> Option<Vec<MetaphlanRpmRow>> {
    if denominator == 0 {
        return None;
    }
    clades
        .iter()
        .map(|c| {
            let reads = c.estimated_number_of_reads_from_the_clade;
            Some(MetaphlanRpmRow {
                clade_name: c.clade_name.clone(),
                clade_taxid: c.clade_taxid.clone(),
                estimated_number_of_reads_from_the_clade: reads,
                estimated_number_of_reads_from_the_clade_per_million: per_million(reads, denominator)?,
                relative_abundance: c.relative_abundance,
                coverage: c.coverage,
            })
        })
        .collect()
}
