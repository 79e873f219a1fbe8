//! Local cache files for reelstats: the cached table of fetched movies, the
//! title-to-id memo, the pending-input reader, and the synchronizer that
//! fills the table from a [`reelstats_core::RecordSource`].

pub mod error;
pub mod id_cache;
pub mod pending;
pub mod sync;
pub mod table;

pub use error::CacheError;
pub use id_cache::{CacheCheck, IdCache};
pub use pending::{load_pending, read_pending};
pub use sync::{
    NoDelay, RandomDelay, SyncEvent, SyncOptions, SyncReport, Throttle, synchronize,
};
pub use table::{CachedTable, MergeStats};
