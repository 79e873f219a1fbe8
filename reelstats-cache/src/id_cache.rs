//! Title-to-id memo, persisted as a JSON object.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use reelstats_core::MovieId;

use crate::error::CacheError;
use crate::table::CachedTable;

/// Maps a title cache key (`"Title (Year)"` or `"Title"`) to the TMDb id it
/// resolved to.
///
/// Entries written as `null` by older runs mean "not found last time"; they
/// are dropped on load so those titles are tried again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdCache {
    entries: BTreeMap<String, MovieId>,
}

impl IdCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from disk. A missing file is an empty cache.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CacheError> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        let raw: BTreeMap<String, Option<MovieId>> = serde_json::from_str(content)?;
        let total = raw.len();
        let entries: BTreeMap<_, _> = raw
            .into_iter()
            .filter_map(|(k, v)| v.map(|id| (k, id)))
            .collect();
        if entries.len() < total {
            log::debug!("Dropped {} unresolved id cache entries", total - entries.len());
        }
        Ok(Self { entries })
    }

    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<MovieId> {
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, key: impl Into<String>, id: MovieId) {
        self.entries.insert(key.into(), id);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MovieId)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn ids(&self) -> BTreeSet<MovieId> {
        self.entries.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Consistency between the id cache and the cached table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheCheck {
    pub id_cache_entries: usize,
    pub table_rows: usize,
    /// Ids present in both files.
    pub in_both: usize,
    /// Ids the id cache knows about that have no table row.
    pub missing_in_table: Vec<MovieId>,
    /// Table rows no id cache entry points at. Expected for id-keyed input.
    pub missing_in_id_cache: Vec<MovieId>,
}

impl CacheCheck {
    pub fn compare(id_cache: &IdCache, table: &CachedTable) -> Self {
        let cached_ids = id_cache.ids();
        let table_ids: BTreeSet<MovieId> = table.ids().into_iter().collect();

        Self {
            id_cache_entries: id_cache.len(),
            table_rows: table.len(),
            in_both: cached_ids.intersection(&table_ids).count(),
            missing_in_table: cached_ids.difference(&table_ids).copied().collect(),
            missing_in_id_cache: table_ids.difference(&cached_ids).copied().collect(),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.missing_in_table.is_empty()
    }
}
