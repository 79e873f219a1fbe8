use thiserror::Error;

use reelstats_cache::CacheError;

#[derive(Debug, Error)]
pub enum LibError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("{0}")]
    Other(String),
}

impl LibError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
