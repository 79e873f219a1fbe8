//! Bring the cached table up to date with a list of pending movies.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::Rng;
use reelstats_core::{FetchOutcome, FlatRecord, MovieQuery, RecordSource};

use crate::error::CacheError;
use crate::id_cache::IdCache;
use crate::table::CachedTable;

pub const DEFAULT_CHECKPOINT_EVERY: usize = 25;
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(2500);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(5);

/// Pause between remote fetches.
pub trait Throttle {
    fn pause(&mut self);
}

/// Sleep for a random duration in `[min, max)`.
#[derive(Debug, Clone, Copy)]
pub struct RandomDelay {
    pub min: Duration,
    pub max: Duration,
}

impl Default for RandomDelay {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_DELAY,
            max: DEFAULT_MAX_DELAY,
        }
    }
}

impl RandomDelay {
    pub fn next_delay(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let secs = rand::thread_rng().gen_range(self.min.as_secs_f64()..self.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

impl Throttle for RandomDelay {
    fn pause(&mut self) {
        let delay = self.next_delay();
        log::debug!("Waiting {:.1}s before next request", delay.as_secs_f64());
        std::thread::sleep(delay);
    }
}

/// No pause at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Throttle for NoDelay {
    fn pause(&mut self) {}
}

/// Options for one synchronization run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Cached table file, rewritten at each checkpoint.
    pub table_path: PathBuf,
    /// Title-to-id cache file, saved alongside the table.
    pub id_cache_path: PathBuf,
    /// Flush after this many processed items. 0 disables intermediate
    /// checkpoints.
    pub checkpoint_every: usize,
    /// Fetch at most this many items (after skipping cached ones).
    pub limit: Option<usize>,
}

impl SyncOptions {
    pub fn new(table_path: PathBuf, id_cache_path: PathBuf) -> Self {
        Self {
            table_path,
            id_cache_path,
            checkpoint_every: DEFAULT_CHECKPOINT_EVERY,
            limit: None,
        }
    }
}

/// Progress events emitted during a run, consumed by the CLI.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// Skipping done; `to_fetch` items will be fetched.
    Started {
        pending: usize,
        skipped: usize,
        to_fetch: usize,
    },
    ItemStarted { index: usize, query: String },
    ItemFound {
        index: usize,
        query: String,
        title: String,
    },
    ItemNotFound { index: usize, query: String },
    ItemFailed {
        index: usize,
        query: String,
        reason: String,
    },
    /// The batch was merged and written to disk.
    Checkpoint {
        processed: usize,
        written: usize,
        total_rows: usize,
    },
    Done,
}

/// Summary of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub pending: usize,
    pub skipped: usize,
    pub processed: usize,
    pub found: usize,
    /// Not found and failed items together.
    pub failed: usize,
    pub checkpoints: usize,
    pub total_rows: usize,
    pub elapsed: Duration,
}

/// Whether a query is already satisfied by the cached table.
fn is_cached(query: &MovieQuery, table: &CachedTable, id_cache: &IdCache) -> bool {
    match query {
        MovieQuery::Id(id) => table.contains(*id),
        MovieQuery::Title { .. } => query
            .cache_key()
            .and_then(|key| id_cache.get(&key))
            .is_some_and(|id| table.contains(id)),
    }
}

/// Fetch every pending query that is not cached yet and merge the results
/// into `table`, writing to disk at each checkpoint.
///
/// Items that are not found or fail are counted and skipped; only I/O errors
/// while writing the cache files abort the run. When nothing new is fetched
/// neither file is touched.
pub fn synchronize(
    pending: &[MovieQuery],
    table: &mut CachedTable,
    id_cache: &mut IdCache,
    source: &mut dyn RecordSource,
    throttle: &mut dyn Throttle,
    options: &SyncOptions,
    on_event: &mut dyn FnMut(SyncEvent),
) -> Result<SyncReport, CacheError> {
    let start = Instant::now();

    let mut to_fetch: Vec<&MovieQuery> = pending
        .iter()
        .filter(|q| !is_cached(q, table, id_cache))
        .collect();
    let skipped = pending.len() - to_fetch.len();
    if let Some(max) = options.limit {
        to_fetch.truncate(max);
    }

    let mut report = SyncReport {
        pending: pending.len(),
        skipped,
        ..SyncReport::default()
    };
    on_event(SyncEvent::Started {
        pending: pending.len(),
        skipped,
        to_fetch: to_fetch.len(),
    });

    let mut batch: Vec<FlatRecord> = Vec::new();
    for (index, query) in to_fetch.iter().enumerate() {
        let label = query.to_string();
        on_event(SyncEvent::ItemStarted {
            index,
            query: label.clone(),
        });

        match source.fetch(query) {
            FetchOutcome::Found(record) => {
                if let Some(key) = query.cache_key() {
                    id_cache.insert(key, record.tmdb_id);
                }
                report.found += 1;
                on_event(SyncEvent::ItemFound {
                    index,
                    query: label,
                    title: record.display_title(),
                });
                batch.push(record);
            }
            FetchOutcome::NotFound => {
                report.failed += 1;
                on_event(SyncEvent::ItemNotFound {
                    index,
                    query: label,
                });
            }
            FetchOutcome::Failed(reason) => {
                report.failed += 1;
                on_event(SyncEvent::ItemFailed {
                    index,
                    query: label,
                    reason,
                });
            }
        }
        report.processed += 1;

        let due = options.checkpoint_every > 0 && report.processed % options.checkpoint_every == 0;
        if due && !batch.is_empty() {
            flush(&mut batch, table, id_cache, options, &mut report, on_event)?;
        }

        throttle.pause();
    }

    if !batch.is_empty() {
        flush(&mut batch, table, id_cache, options, &mut report, on_event)?;
    }

    report.total_rows = table.len();
    report.elapsed = start.elapsed();
    on_event(SyncEvent::Done);
    Ok(report)
}

fn flush(
    batch: &mut Vec<FlatRecord>,
    table: &mut CachedTable,
    id_cache: &IdCache,
    options: &SyncOptions,
    report: &mut SyncReport,
    on_event: &mut dyn FnMut(SyncEvent),
) -> Result<(), CacheError> {
    let written = batch.len();
    let stats = table.merge(batch.drain(..));
    table.save(&options.table_path)?;
    id_cache.save(&options.id_cache_path)?;
    report.checkpoints += 1;

    log::debug!(
        "Checkpoint after {} items: {} added, {} replaced, {} rows total",
        report.processed,
        stats.added,
        stats.replaced,
        table.len()
    );
    on_event(SyncEvent::Checkpoint {
        processed: report.processed,
        written,
        total_rows: table.len(),
    });
    Ok(())
}
