use thiserror::Error;

use reelstats_cache::CacheError;
use reelstats_dashboard::DashboardError;
use reelstats_lib::LibError;
use reelstats_tmdb::TmdbError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Tmdb(#[from] TmdbError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Lib(#[from] LibError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
