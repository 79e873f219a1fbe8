use std::time::Duration;

use serde::de::DeserializeOwned;

use reelstats_core::MovieId;

use crate::credentials::ApiKey;
use crate::error::TmdbError;
use crate::types::{ErrorBody, MovieDetails, SearchResponse, SearchResult};

const BASE_URL: &str = "https://api.themoviedb.org/3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The two catalog lookups the resolver and fetcher need.
///
/// [`TmdbClient`] is the real implementation; tests use in-memory fakes.
pub trait Catalog {
    /// Search by title, optionally constrained to a release year. Results are
    /// in TMDb's ranking order.
    fn search_movie(&self, title: &str, year: Option<i32>)
    -> Result<Vec<SearchResult>, TmdbError>;

    /// Full details for one movie with the credits sub-resource embedded.
    fn movie_details(&self, id: MovieId) -> Result<MovieDetails, TmdbError>;
}

/// Blocking HTTP client for the TMDb v3 API.
///
/// Requests are strictly sequential; pacing between requests is the
/// caller's job (see the cache synchronizer's throttle).
pub struct TmdbClient {
    http: reqwest::blocking::Client,
    api_key: ApiKey,
    base_url: String,
}

impl TmdbClient {
    pub fn new(api_key: ApiKey) -> Result<Self, TmdbError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("reelstats/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API root (no trailing slash).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Check the API key with a cheap authenticated request.
    pub fn validate(&self) -> Result<(), TmdbError> {
        let _: serde_json::Value = self.get("/configuration", &[])?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.expose())])
            .query(params)
            .send()?;

        let status = resp.status();
        let text = resp.text()?;

        if !status.is_success() {
            return Err(classify_status(status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            TmdbError::api(format!(
                "Failed to parse response from {path}: {e}. Response: {}",
                truncate(&text, 200)
            ))
        })
    }
}

impl Catalog for TmdbClient {
    fn search_movie(
        &self,
        title: &str,
        year: Option<i32>,
    ) -> Result<Vec<SearchResult>, TmdbError> {
        let mut params = vec![("query", title.to_string())];
        if let Some(y) = year {
            params.push(("year", y.to_string()));
        }
        let resp: SearchResponse = self.get("/search/movie", &params)?;
        Ok(resp.results)
    }

    fn movie_details(&self, id: MovieId) -> Result<MovieDetails, TmdbError> {
        self.get(
            &format!("/movie/{id}"),
            &[("append_to_response", "credits".to_string())],
        )
    }
}

/// Map a non-success status (and TMDb's JSON error body, if any) to an error.
pub fn classify_status(status: u16, body: &str) -> TmdbError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.status_message)
        .unwrap_or_else(|| truncate(body, 200).to_string());

    match status {
        401 => TmdbError::InvalidCredentials(message),
        404 => TmdbError::NotFound,
        429 => TmdbError::RateLimit,
        _ => TmdbError::ServerError { status, message },
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_invalid_credentials() {
        let body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;
        match classify_status(401, body) {
            TmdbError::InvalidCredentials(msg) => assert!(msg.starts_with("Invalid API key")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn not_found_and_rate_limit() {
        assert!(matches!(classify_status(404, ""), TmdbError::NotFound));
        assert!(matches!(classify_status(429, ""), TmdbError::RateLimit));
    }

    #[test]
    fn other_statuses_keep_plain_body() {
        match classify_status(503, "upstream down") {
            TmdbError::ServerError { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
