pub mod client;
pub mod credentials;
pub mod error;
pub mod fetch;
pub mod flatten;
pub mod resolve;
pub mod types;

pub use client::{Catalog, TmdbClient};
pub use credentials::{ApiKey, CredentialSource, api_key_source, config_path, save_to_file};
pub use error::TmdbError;
pub use fetch::{TmdbFetcher, fetch_details, fetch_movie};
pub use resolve::resolve;
pub use types::{MovieDetails, SearchResult};
