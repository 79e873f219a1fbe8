//! Post-processing: derive the analytical columns from the cached table.

use std::path::Path;

use reelstats_cache::CachedTable;
use reelstats_core::delimited;
use reelstats_core::release::{decade_label, release_year};
use reelstats_core::{AnalyticalRecord, FlatRecord};

use crate::analytical::write_analytical;
use crate::error::LibError;

/// Row counts from a [`run_prepare`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareSummary {
    pub rows: usize,
    /// Rows whose release date did not yield a year.
    pub undated: usize,
}

/// Derive `year`, `decade`, `main_country` and `main_language` for every row.
pub fn prepare(records: &[FlatRecord]) -> Vec<AnalyticalRecord> {
    records.iter().cloned().map(prepare_one).collect()
}

fn prepare_one(mut record: FlatRecord) -> AnalyticalRecord {
    record.actors = record.actors.map(|a| fix_name_suffixes(&a));

    let year = record.release_date.as_deref().and_then(release_year);
    let decade = year.map(decade_label).unwrap_or_default();
    let main_country = delimited::first(record.production_countries.as_deref());
    let main_language = delimited::first(record.spoken_languages.as_deref());

    AnalyticalRecord::from_flat(record, year, decade, main_country, main_language)
}

/// Glue generational suffixes back onto the name they belong to, so
/// `"Robert Downey, Jr."` is not split into two people.
pub fn fix_name_suffixes(names: &str) -> String {
    names.replace(", Jr.", " Jr.")
}

/// Read the cached table, transform it, and write the analytical table.
pub fn run_prepare(cache_path: &Path, output_path: &Path) -> Result<PrepareSummary, LibError> {
    if !cache_path.exists() {
        return Err(LibError::other(format!(
            "Cached table not found at {}. Run 'reelstats fetch' first",
            cache_path.display()
        )));
    }

    let table = CachedTable::load(cache_path)?;
    let rows = prepare(table.records());
    write_analytical(output_path, &rows)?;

    let summary = PrepareSummary {
        rows: rows.len(),
        undated: rows.iter().filter(|r| r.year.is_none()).count(),
    };
    log::debug!(
        "Wrote {} rows ({} undated) to {}",
        summary.rows,
        summary.undated,
        output_path.display()
    );
    Ok(summary)
}

#[cfg(test)]
#[path = "tests/transform_tests.rs"]
mod tests;
