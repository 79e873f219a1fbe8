use reelstats_core::{FetchOutcome, FlatRecord, MovieId, MovieQuery, RecordSource};

use crate::client::Catalog;
use crate::error::TmdbError;
use crate::resolve::resolve;

/// Fetch and flatten the details of a resolved id.
pub fn fetch_details<C: Catalog + ?Sized>(
    catalog: &C,
    id: MovieId,
) -> Result<FlatRecord, TmdbError> {
    Ok(catalog.movie_details(id)?.flatten(id))
}

/// Resolve a query and fetch its details.
///
/// Never fails: connection errors, timeouts, HTTP error statuses and bad
/// payloads are logged and reported as [`FetchOutcome::Failed`].
pub fn fetch_movie<C: Catalog + ?Sized>(catalog: &C, query: &MovieQuery) -> FetchOutcome {
    let id = match resolve(catalog, query) {
        Ok(Some(id)) => id,
        Ok(None) => return FetchOutcome::NotFound,
        Err(e) => {
            log::warn!("Lookup failed for {}: {}", query, e);
            return FetchOutcome::Failed(e.to_string());
        }
    };

    match fetch_details(catalog, id) {
        Ok(record) => FetchOutcome::Found(record),
        Err(e) => {
            log::warn!("Fetching details for tmdb:{} failed: {}", id, e);
            FetchOutcome::Failed(e.to_string())
        }
    }
}

/// [`RecordSource`] backed by a TMDb catalog.
pub struct TmdbFetcher<C: Catalog> {
    catalog: C,
}

impl<C: Catalog> TmdbFetcher<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}

impl<C: Catalog> RecordSource for TmdbFetcher<C> {
    fn fetch(&mut self, query: &MovieQuery) -> FetchOutcome {
        fetch_movie(&self.catalog, query)
    }
}
