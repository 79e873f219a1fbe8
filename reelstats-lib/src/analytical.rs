//! Reading and writing the analytical table (`final_movies.csv`).

use std::io::{Read, Write};
use std::path::Path;

use reelstats_core::AnalyticalRecord;

use crate::error::LibError;

pub const COLUMNS: [&str; 15] = [
    "tmdb_id",
    "title",
    "release_date",
    "actors",
    "directors",
    "screenwriters",
    "cinematographers",
    "runtime",
    "genres",
    "spoken_languages",
    "production_countries",
    "year",
    "decade",
    "main_country",
    "main_language",
];

pub fn read_analytical(path: &Path) -> Result<Vec<AnalyticalRecord>, LibError> {
    let file = std::fs::File::open(path)?;
    read_analytical_from(file)
}

pub fn read_analytical_from<R: Read>(reader: R) -> Result<Vec<AnalyticalRecord>, LibError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line, row) in rdr.deserialize::<AnalyticalRecord>().enumerate() {
        match row {
            Ok(r) => rows.push(r),
            Err(e) => log::warn!("Skipping unreadable row {}: {}", line + 1, e),
        }
    }
    Ok(rows)
}

/// Write the analytical table, creating parent directories. The file is
/// replaced wholesale.
pub fn write_analytical(path: &Path, rows: &[AnalyticalRecord]) -> Result<(), LibError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let mut out = std::io::BufWriter::new(file);
    write_analytical_to(&mut out, rows)?;
    out.flush()?;
    Ok(())
}

pub fn write_analytical_to<W: Write>(writer: W, rows: &[AnalyticalRecord]) -> Result<(), LibError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
