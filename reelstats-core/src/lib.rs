//! Shared data model for reelstats.
//!
//! Everything that crosses a crate boundary lives here: the flat record the
//! fetcher produces, the analytical record the transform derives, the
//! delimited-string encoding of multi-valued fields, and the
//! [`RecordSource`] seam the cache synchronizer fetches through.

pub mod delimited;
pub mod record;
pub mod release;
pub mod source;
pub mod util;

pub use record::{AnalyticalRecord, FlatRecord};
pub use release::{decade_label, release_year};
pub use source::{FetchOutcome, MovieQuery, RecordSource};

/// TMDb's numeric movie identifier.
pub type MovieId = u64;
