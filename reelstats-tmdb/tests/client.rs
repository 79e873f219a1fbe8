//! `TmdbClient` against a local mock of the TMDb v3 API.
//!
//! The mock server runs on its own thread; the blocking client is only ever
//! used outside the tokio runtime that sets it up.

use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use reelstats_core::{FetchOutcome, MovieQuery, RecordSource};
use reelstats_tmdb::{ApiKey, TmdbClient, TmdbFetcher, fetch_movie, resolve};

const KEY: &str = "test-key";

/// Matches requests that carry no `year` query parameter.
struct NoYear;

impl Match for NoYear {
    fn matches(&self, request: &Request) -> bool {
        !request.url.query_pairs().any(|(k, _)| k == "year")
    }
}

fn start() -> (Runtime, MockServer) {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    (rt, server)
}

fn client(server: &MockServer) -> TmdbClient {
    TmdbClient::new(ApiKey::new(KEY).unwrap())
        .unwrap()
        .with_base_url(server.uri())
}

fn matrix_details() -> serde_json::Value {
    json!({
        "id": 603,
        "title": "The Matrix",
        "release_date": "1999-03-30",
        "runtime": 136,
        "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
        "spoken_languages": [{"iso_639_1": "en", "english_name": "English", "name": "English"}],
        "production_countries": [{"iso_3166_1": "US", "name": "United States of America"}],
        "credits": {
            "cast": [{"name": "Keanu Reeves", "order": 0}, {"name": "Carrie-Anne Moss", "order": 1}],
            "crew": [
                {"name": "Lana Wachowski", "job": "Director"},
                {"name": "Lana Wachowski", "job": "Screenplay"},
                {"name": "Bill Pope", "job": "Director of Photography"}
            ]
        }
    })
}

fn mount_status(rt: &Runtime, server: &MockServer, route: &str, response: ResponseTemplate) {
    rt.block_on(
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .mount(server),
    );
}

#[test]
fn details_request_sends_key_and_credits() {
    let (rt, server) = start();
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/movie/603"))
            .and(query_param("api_key", KEY))
            .and(query_param("append_to_response", "credits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(matrix_details()))
            .mount(&server),
    );

    let record = match fetch_movie(&client(&server), &MovieQuery::Id(603)) {
        FetchOutcome::Found(record) => record,
        other => panic!("unexpected {other:?}"),
    };

    assert_eq!(record.tmdb_id, 603);
    assert_eq!(record.title.as_deref(), Some("The Matrix"));
    assert_eq!(record.release_date.as_deref(), Some("1999-03-30"));
    assert_eq!(record.runtime, Some(136));
    assert_eq!(record.directors.as_deref(), Some("Lana Wachowski"));
    assert_eq!(record.screenwriters.as_deref(), Some("Lana Wachowski"));
    assert_eq!(record.cinematographers.as_deref(), Some("Bill Pope"));
    assert_eq!(record.actors.as_deref(), Some("Keanu Reeves, Carrie-Anne Moss"));
    assert_eq!(record.genres.as_deref(), Some("Action, Science Fiction"));
    assert_eq!(
        record.production_countries.as_deref(),
        Some("United States of America")
    );
}

#[test]
fn title_search_retries_without_year() {
    let (rt, server) = start();
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("year", "1999"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .mount(&server),
    );
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(NoYear)
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"id": 603, "title": "The Matrix"},
                    {"id": 604, "title": "The Matrix Reloaded"}
                ]
            })))
            .mount(&server),
    );

    let query = MovieQuery::title("The Matrix", Some(1999));
    let id = resolve(&client(&server), &query).unwrap();
    assert_eq!(id, Some(603));

    let requests = rt.block_on(server.received_requests()).unwrap();
    assert_eq!(requests.len(), 2);

    let params = |i: usize| -> Vec<(String, String)> {
        requests[i]
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    };
    let first = params(0);
    let second = params(1);
    assert!(first.contains(&("api_key".into(), KEY.into())));
    assert!(first.contains(&("query".into(), "The Matrix".into())));
    assert!(first.contains(&("year".into(), "1999".into())));
    assert!(second.contains(&("query".into(), "The Matrix".into())));
    assert!(second.iter().all(|(k, _)| k != "year"));
}

#[test]
fn empty_search_is_not_found() {
    let (rt, server) = start();
    mount_status(
        &rt,
        &server,
        "/search/movie",
        ResponseTemplate::new(200).set_body_json(json!({"results": []})),
    );

    let mut fetcher = TmdbFetcher::new(client(&server));
    let outcome = fetcher.fetch(&MovieQuery::title("Nothing Like This", None));

    assert_eq!(outcome, FetchOutcome::NotFound);
}

#[test]
fn bad_key_fails_the_item() {
    let (rt, server) = start();
    mount_status(
        &rt,
        &server,
        "/movie/603",
        ResponseTemplate::new(401).set_body_json(json!({
            "status_code": 7,
            "status_message": "Invalid API key: You must be granted a valid key.",
            "success": false
        })),
    );

    let mut fetcher = TmdbFetcher::new(client(&server));
    match fetcher.fetch(&MovieQuery::Id(603)) {
        FetchOutcome::Failed(reason) => assert!(reason.contains("Invalid API key"), "{reason}"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn missing_details_fail_the_item() {
    let (rt, server) = start();
    mount_status(
        &rt,
        &server,
        "/movie/999999",
        ResponseTemplate::new(404).set_body_json(json!({
            "status_code": 34,
            "status_message": "The resource you requested could not be found."
        })),
    );

    let mut fetcher = TmdbFetcher::new(client(&server));
    match fetcher.fetch(&MovieQuery::Id(999999)) {
        FetchOutcome::Failed(reason) => assert!(reason.contains("not found"), "{reason}"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn server_error_fails_the_item() {
    let (rt, server) = start();
    mount_status(
        &rt,
        &server,
        "/search/movie",
        ResponseTemplate::new(503).set_body_string("upstream down"),
    );

    let mut fetcher = TmdbFetcher::new(client(&server));
    match fetcher.fetch(&MovieQuery::title("The Matrix", None)) {
        FetchOutcome::Failed(reason) => {
            assert!(reason.contains("HTTP 503"), "{reason}");
            assert!(reason.contains("upstream down"), "{reason}");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn malformed_body_fails_the_item() {
    let (rt, server) = start();
    mount_status(
        &rt,
        &server,
        "/movie/603",
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    );

    let mut fetcher = TmdbFetcher::new(client(&server));
    match fetcher.fetch(&MovieQuery::Id(603)) {
        FetchOutcome::Failed(reason) => assert!(reason.contains("Failed to parse"), "{reason}"),
        other => panic!("unexpected {other:?}"),
    }
}
