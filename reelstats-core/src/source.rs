use std::fmt;

use crate::{FlatRecord, MovieId};

/// What the user asked for: a known TMDb id, or a title to search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovieQuery {
    Id(MovieId),
    Title { title: String, year: Option<i32> },
}

impl MovieQuery {
    pub fn title(title: impl Into<String>, year: Option<i32>) -> Self {
        Self::Title {
            title: title.into(),
            year,
        }
    }

    /// Key used in the title-to-id cache. `None` for id queries.
    pub fn cache_key(&self) -> Option<String> {
        match self {
            Self::Id(_) => None,
            Self::Title {
                title,
                year: Some(y),
            } => Some(format!("{} ({})", title.trim(), y)),
            Self::Title { title, year: None } => Some(title.trim().to_string()),
        }
    }
}

impl fmt::Display for MovieQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "tmdb:{}", id),
            Self::Title {
                title,
                year: Some(y),
            } => write!(f, "'{}' ({})", title, y),
            Self::Title { title, year: None } => write!(f, "'{}'", title),
        }
    }
}

/// Result of fetching one movie. `NotFound` and `Failed` both mean "no
/// record" to the synchronizer; they are kept apart for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(FlatRecord),
    NotFound,
    Failed(String),
}

/// Anything that can turn a [`MovieQuery`] into a flat record.
///
/// Implemented by the TMDb fetcher; tests substitute in-memory fakes.
pub trait RecordSource {
    fn fetch(&mut self, query: &MovieQuery) -> FetchOutcome;
}
