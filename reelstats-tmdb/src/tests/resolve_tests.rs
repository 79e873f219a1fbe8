use std::cell::RefCell;
use std::collections::HashMap;

use reelstats_core::{FetchOutcome, MovieId, MovieQuery, RecordSource};

use super::*;
use crate::TmdbFetcher;
use crate::types::{MovieDetails, SearchResult};

/// In-memory catalog that records every call.
#[derive(Default)]
struct FakeCatalog {
    /// (title, year) -> ranked ids
    search: HashMap<(String, Option<i32>), Vec<MovieId>>,
    details: HashMap<MovieId, MovieDetails>,
    fail_details: bool,
    calls: RefCell<Vec<String>>,
}

impl FakeCatalog {
    fn with_search(mut self, title: &str, year: Option<i32>, ids: &[MovieId]) -> Self {
        self.search
            .insert((title.to_string(), year), ids.to_vec());
        self
    }

    fn with_details(mut self, id: MovieId, title: &str) -> Self {
        self.details.insert(
            id,
            MovieDetails {
                title: Some(title.to_string()),
                ..Default::default()
            },
        );
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Catalog for FakeCatalog {
    fn search_movie(
        &self,
        title: &str,
        year: Option<i32>,
    ) -> Result<Vec<SearchResult>, TmdbError> {
        self.calls
            .borrow_mut()
            .push(format!("search {title} {year:?}"));
        let ids = self
            .search
            .get(&(title.to_string(), year))
            .cloned()
            .unwrap_or_default();
        Ok(ids
            .into_iter()
            .map(|id| SearchResult {
                id,
                title: Some(title.to_string()),
                original_title: None,
                release_date: None,
                overview: None,
            })
            .collect())
    }

    fn movie_details(&self, id: MovieId) -> Result<MovieDetails, TmdbError> {
        self.calls.borrow_mut().push(format!("details {id}"));
        if self.fail_details {
            return Err(TmdbError::ServerError {
                status: 500,
                message: "boom".to_string(),
            });
        }
        self.details.get(&id).cloned().ok_or(TmdbError::NotFound)
    }
}

#[test]
fn direct_id_skips_search() {
    let catalog = FakeCatalog::default();
    let id = resolve(&catalog, &MovieQuery::Id(11104)).unwrap();
    assert_eq!(id, Some(11104));
    assert!(catalog.calls().is_empty());
}

#[test]
fn title_with_year_takes_first_result() {
    let catalog = FakeCatalog::default().with_search("Chungking Express", Some(1994), &[11104, 999]);
    let id = resolve(&catalog, &MovieQuery::title("Chungking Express", Some(1994))).unwrap();
    assert_eq!(id, Some(11104));
    assert_eq!(catalog.calls(), vec!["search Chungking Express Some(1994)"]);
}

#[test]
fn retries_once_without_year() {
    let catalog = FakeCatalog::default().with_search("Uzak", None, &[1234]);
    let id = resolve(&catalog, &MovieQuery::title("Uzak", Some(2003))).unwrap();
    assert_eq!(id, Some(1234));
    assert_eq!(
        catalog.calls(),
        vec!["search Uzak Some(2003)", "search Uzak None"]
    );
}

#[test]
fn no_retry_without_year() {
    let catalog = FakeCatalog::default();
    let id = resolve(&catalog, &MovieQuery::title("Nothing", None)).unwrap();
    assert_eq!(id, None);
    assert_eq!(catalog.calls(), vec!["search Nothing None"]);
}

#[test]
fn not_found_after_retry() {
    let catalog = FakeCatalog::default();
    let id = resolve(&catalog, &MovieQuery::title("Nothing", Some(1999))).unwrap();
    assert_eq!(id, None);
    assert_eq!(catalog.calls().len(), 2);
}

#[test]
fn fetcher_resolves_then_fetches_details() {
    let catalog = FakeCatalog::default()
        .with_search("Uzak", Some(2002), &[1234])
        .with_details(1234, "Uzak");
    let mut fetcher = TmdbFetcher::new(catalog);

    let outcome = fetcher.fetch(&MovieQuery::title("Uzak", Some(2002)));
    match outcome {
        FetchOutcome::Found(record) => {
            assert_eq!(record.tmdb_id, 1234);
            assert_eq!(record.title.as_deref(), Some("Uzak"));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        fetcher.catalog().calls(),
        vec!["search Uzak Some(2002)", "details 1234"]
    );
}

#[test]
fn fetcher_reports_not_found_for_unknown_title() {
    let mut fetcher = TmdbFetcher::new(FakeCatalog::default());
    assert_eq!(
        fetcher.fetch(&MovieQuery::title("Nothing", None)),
        FetchOutcome::NotFound
    );
}

#[test]
fn detail_errors_become_failed_outcomes() {
    let catalog = FakeCatalog {
        fail_details: true,
        ..Default::default()
    };
    let mut fetcher = TmdbFetcher::new(catalog);
    match fetcher.fetch(&MovieQuery::Id(42)) {
        FetchOutcome::Failed(reason) => assert!(reason.contains("HTTP 500")),
        other => panic!("unexpected {other:?}"),
    }
}
