//! Reading the list of movies the user wants cached.

use std::io::Read;
use std::path::Path;

use reelstats_core::{MovieId, MovieQuery};

use crate::error::CacheError;

const ID_COLUMNS: &[&str] = &["tmdb_id", "tmdbid", "id"];
const TITLE_COLUMNS: &[&str] = &["title", "name"];
const YEAR_COLUMNS: &[&str] = &["year"];

/// Load pending queries from a CSV file.
///
/// A `tmdb_id` column yields id queries; otherwise `title` (with an optional
/// `year`) yields title queries. Rows with neither are skipped.
pub fn load_pending(path: &Path) -> Result<Vec<MovieQuery>, CacheError> {
    let file = std::fs::File::open(path)?;
    let queries = read_pending(file)?;
    log::debug!("Read {} pending entries from {}", queries.len(), path.display());
    Ok(queries)
}

pub fn read_pending<R: Read>(reader: R) -> Result<Vec<MovieQuery>, CacheError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let find = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
    };
    let id_col = find(ID_COLUMNS);
    let title_col = find(TITLE_COLUMNS);
    let year_col = find(YEAR_COLUMNS);

    if id_col.is_none() && title_col.is_none() {
        return Err(CacheError::invalid_input(
            "expected a 'tmdb_id' or 'title' column",
        ));
    }

    let mut queries = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        let line = i + 2;
        let cell = |col: Option<usize>| col.and_then(|c| row.get(c)).filter(|v| !v.is_empty());

        if let Some(raw) = cell(id_col) {
            match parse_id(raw) {
                Some(id) => queries.push(MovieQuery::Id(id)),
                None => log::warn!("Line {}: invalid tmdb_id '{}', skipping", line, raw),
            }
            continue;
        }

        match cell(title_col) {
            Some(title) => {
                let year = cell(year_col).and_then(parse_year);
                queries.push(MovieQuery::title(title, year));
            }
            None => log::warn!("Line {}: no tmdb_id or title, skipping", line),
        }
    }
    Ok(queries)
}

/// Ids sometimes arrive as floats (`"11104.0"`) from spreadsheet exports.
fn parse_id(raw: &str) -> Option<MovieId> {
    raw.parse::<MovieId>().ok().or_else(|| {
        let f = raw.parse::<f64>().ok()?;
        (f.is_finite() && f > 0.0 && f.fract() == 0.0).then_some(f as MovieId)
    })
}

fn parse_year(raw: &str) -> Option<i32> {
    raw.parse::<i32>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().map(|f| f as i32))
}
