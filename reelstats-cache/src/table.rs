//! The cached table: one row per fetched movie, unique by `tmdb_id`.

use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};
use std::path::Path;

use reelstats_core::{FlatRecord, MovieId};

use crate::error::CacheError;

/// Column order of the cached table file.
pub const COLUMNS: [&str; 11] = [
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
];

/// What a merge did to the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub replaced: usize,
}

/// In-memory copy of the cached table.
///
/// Row order is first-insertion order. Merging a record whose id is already
/// present replaces that row in place, so the last fetched copy wins.
#[derive(Debug, Clone, Default)]
pub struct CachedTable {
    records: Vec<FlatRecord>,
    index: HashMap<MovieId, usize>,
}

impl CachedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows, collapsing duplicate ids (last wins).
    pub fn from_records(records: impl IntoIterator<Item = FlatRecord>) -> Self {
        let mut table = Self::new();
        let stats = table.merge(records);
        if stats.replaced > 0 {
            log::warn!(
                "Cached table contained {} duplicate id(s); kept the last copy of each",
                stats.replaced
            );
        }
        table
    }

    /// Load the table from disk. A missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        if !path.exists() {
            log::debug!("No cached table at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        let file = std::fs::File::open(path)?;
        let table = Self::read_from(file)?;
        log::debug!("Loaded {} cached rows from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse CSV rows from any reader. Rows without a usable `tmdb_id` are
    /// skipped with a warning.
    pub fn read_from<R: Read>(reader: R) -> Result<Self, CacheError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for (line, row) in rdr.deserialize::<FlatRecord>().enumerate() {
            match row {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Skipping unreadable cached row {}: {}", line + 1, e),
            }
        }
        Ok(Self::from_records(records))
    }

    /// Write the whole table, replacing the file atomically.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("csv.tmp");
        {
            let file = std::fs::File::create(&tmp_path)?;
            let mut out = std::io::BufWriter::new(file);
            self.write_to(&mut out)?;
            out.flush()?;
        }
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Serialize the table as CSV. The header is written even when empty.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), CacheError> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        wtr.write_record(COLUMNS)?;
        for record in &self.records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Insert or replace records by id.
    pub fn merge(&mut self, batch: impl IntoIterator<Item = FlatRecord>) -> MergeStats {
        let mut stats = MergeStats::default();
        for record in batch {
            match self.index.get(&record.tmdb_id) {
                Some(&pos) => {
                    self.records[pos] = record;
                    stats.replaced += 1;
                }
                None => {
                    self.index.insert(record.tmdb_id, self.records.len());
                    self.records.push(record);
                    stats.added += 1;
                }
            }
        }
        stats
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: MovieId) -> Option<&FlatRecord> {
        self.index.get(&id).map(|&pos| &self.records[pos])
    }

    pub fn ids(&self) -> HashSet<MovieId> {
        self.index.keys().copied().collect()
    }

    pub fn records(&self) -> &[FlatRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
