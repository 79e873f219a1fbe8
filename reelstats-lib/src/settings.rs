//! Application settings: where the data directory lives and the file layout
//! inside it.
//!
//! The settings file is `~/.config/reelstats/settings.toml`, next to the
//! TMDb credentials file.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Data directory used when neither the CLI nor the settings file names one.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Canonical path to the settings file: `~/.config/reelstats/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("reelstats").join("settings.toml")
}

/// Which layer of the priority chain supplied the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataDirSource {
    Cli,
    Settings,
    Default,
}

impl fmt::Display for DataDirSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "--data-dir"),
            Self::Settings => write!(f, "settings.toml"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Resolve the data directory:
///
/// 1. CLI override (if `Some`)
/// 2. `paths.data_dir` in `settings.toml`
/// 3. `./data`
pub fn resolve_data_dir(cli_override: Option<PathBuf>) -> (PathBuf, DataDirSource) {
    if let Some(p) = cli_override {
        return (p, DataDirSource::Cli);
    }
    let saved = std::fs::read_to_string(settings_path())
        .ok()
        .and_then(|c| data_dir_from_settings(&c));
    match saved {
        Some(p) => (p, DataDirSource::Settings),
        None => (PathBuf::from(DEFAULT_DATA_DIR), DataDirSource::Default),
    }
}

/// Read `paths.data_dir` out of settings file contents.
pub fn data_dir_from_settings(contents: &str) -> Option<PathBuf> {
    let doc: toml::Value = contents.parse().ok()?;
    let dir = doc.get("paths")?.get("data_dir")?.as_str()?;
    if dir.is_empty() {
        None
    } else {
        Some(PathBuf::from(dir))
    }
}

/// Save (or clear) the data directory in the default settings file.
pub fn save_data_dir(path: Option<&Path>) -> io::Result<()> {
    save_data_dir_to(&settings_path(), path)
}

/// Save (or clear) `paths.data_dir` in `settings`, keeping any other keys.
pub fn save_data_dir_to(settings: &Path, path: Option<&Path>) -> io::Result<()> {
    let mut doc: toml::Value = match std::fs::read_to_string(settings) {
        Ok(contents) => contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default())),
        Err(_) => toml::Value::Table(Default::default()),
    };

    let root = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let paths = root
        .entry("paths")
        .or_insert_with(|| toml::Value::Table(Default::default()))
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[paths] is not a table"))?;

    match path {
        Some(p) => {
            paths.insert(
                "data_dir".to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            paths.remove("data_dir");
        }
    }

    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

/// The settings file pretty-printed, for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

/// File layout under the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default pending-movies input.
    pub fn pending_input(&self) -> PathBuf {
        self.root.join("raw").join("sample_movies.csv")
    }

    pub fn cached_table(&self) -> PathBuf {
        self.root.join("cache").join("tmdb_data.csv")
    }

    pub fn id_cache(&self) -> PathBuf {
        self.root.join("cache").join("tmdb_id_cache.json")
    }

    pub fn analytical_table(&self) -> PathBuf {
        self.root.join("processed").join("final_movies.csv")
    }

    pub fn dashboard(&self) -> PathBuf {
        self.root.join("processed").join("dashboard.html")
    }
}

/// Configuration resolved once at startup and handed to each command.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub paths: DataPaths,
    pub data_dir_source: DataDirSource,
}

impl AppConfig {
    pub fn resolve(data_dir_override: Option<PathBuf>) -> Self {
        let (root, data_dir_source) = resolve_data_dir(data_dir_override);
        Self {
            paths: DataPaths::new(root),
            data_dir_source,
        }
    }
}
