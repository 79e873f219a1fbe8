use reelstats_core::{MovieId, MovieQuery};

use crate::client::Catalog;
use crate::error::TmdbError;

/// Resolve a query to one canonical TMDb id.
///
/// 1. An id query resolves to itself without touching the catalog.
/// 2. A title query searches with the year, when given.
/// 3. If that finds nothing and a year was given, search once more without it.
///
/// The first result is taken as canonical; there is no disambiguation, so an
/// ambiguous title gets whatever TMDb ranks first. `Ok(None)` means not found.
pub fn resolve<C: Catalog + ?Sized>(
    catalog: &C,
    query: &MovieQuery,
) -> Result<Option<MovieId>, TmdbError> {
    let (title, year) = match query {
        MovieQuery::Id(id) => return Ok(Some(*id)),
        MovieQuery::Title { title, year } => (title.as_str(), *year),
    };

    let mut results = catalog.search_movie(title, year)?;

    if results.is_empty() && year.is_some() {
        log::info!("Retrying without year for '{}'...", title);
        results = catalog.search_movie(title, None)?;
    }

    match results.first() {
        Some(hit) => {
            log::debug!(
                "Resolved {} to tmdb:{} ({})",
                query,
                hit.id,
                hit.title.as_deref().unwrap_or("untitled"),
            );
            Ok(Some(hit.id))
        }
        None => {
            log::warn!("Movie not found: {}", query);
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;
