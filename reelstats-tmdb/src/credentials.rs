use std::fmt;
use std::path::PathBuf;

use crate::error::TmdbError;

/// Environment variable holding the TMDb v3 API key.
pub const API_KEY_VAR: &str = "TMDB_API_KEY";

/// A TMDb v3 API key. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting blank input.
    pub fn new(key: impl Into<String>) -> Result<Self, TmdbError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(TmdbError::config("API key is empty"));
        }
        Ok(Self(key))
    }

    /// Load the key from the environment or the config file.
    ///
    /// Priority: `$TMDB_API_KEY` > `credentials.toml`. A `.env` file is only
    /// seen here if the binary loaded it into the environment beforehand.
    pub fn load() -> Result<Self, TmdbError> {
        let key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(load_config_file)
            .ok_or_else(|| {
                TmdbError::config(format!(
                    "Missing TMDb API key. Set {API_KEY_VAR} (or add it to .env) or run 'reelstats config setup'"
                ))
            })?;
        Self::new(key)
    }

    /// The raw key, for request parameters.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First two characters followed by a mask, for display.
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(2).collect();
        if self.0.chars().count() <= 2 {
            "****".to_string()
        } else {
            format!("{prefix}****")
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.masked())
    }
}

/// Where the API key's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable (possibly populated from `.env`).
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    tmdb: Option<TmdbConfig>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct TmdbConfig {
    api_key: Option<String>,
}

/// Return the path to the credentials config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("reelstats").join("credentials.toml"))
}

/// Save the API key to the config file, creating parent directories as needed.
/// Returns the path the file was written to.
pub fn save_to_file(key: &ApiKey) -> Result<PathBuf, TmdbError> {
    let path =
        config_path().ok_or_else(|| TmdbError::config("Could not determine config directory"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config = ConfigFile {
        tmdb: Some(TmdbConfig {
            api_key: Some(key.expose().to_string()),
        }),
    };

    let toml_str = toml::to_string_pretty(&config)
        .map_err(|e| TmdbError::config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(&path, toml_str)?;
    Ok(path)
}

/// Determine where the API key is coming from.
pub fn api_key_source() -> CredentialSource {
    if std::env::var(API_KEY_VAR).is_ok_and(|v| !v.trim().is_empty()) {
        CredentialSource::EnvVar(API_KEY_VAR)
    } else if load_config_file().is_some() {
        CredentialSource::ConfigFile
    } else {
        CredentialSource::Missing
    }
}

fn load_config_file() -> Option<String> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Option<String> {
    let config: ConfigFile = toml::from_str(content).ok()?;
    config
        .tmdb?
        .api_key
        .filter(|k| !k.trim().is_empty())
}
