use std::collections::HashSet;
use std::path::Path;

use reelstats_cache::{
    CachedTable, IdCache, NoDelay, SyncEvent, SyncOptions, Throttle, synchronize,
};
use reelstats_core::{FetchOutcome, FlatRecord, MovieId, MovieQuery, RecordSource};

/// Returns a record for every id, except those listed in `missing` or
/// `broken`. Title queries resolve to `title_ids`.
#[derive(Default)]
struct FakeSource {
    calls: Vec<MovieQuery>,
    missing: HashSet<MovieId>,
    broken: HashSet<MovieId>,
    title_ids: Vec<(String, MovieId)>,
}

impl RecordSource for FakeSource {
    fn fetch(&mut self, query: &MovieQuery) -> FetchOutcome {
        self.calls.push(query.clone());
        let id = match query {
            MovieQuery::Id(id) => *id,
            MovieQuery::Title { title, .. } => {
                match self.title_ids.iter().find(|(t, _)| t == title) {
                    Some((_, id)) => *id,
                    None => return FetchOutcome::NotFound,
                }
            }
        };
        if self.missing.contains(&id) {
            FetchOutcome::NotFound
        } else if self.broken.contains(&id) {
            FetchOutcome::Failed("HTTP error: timed out".to_string())
        } else {
            FetchOutcome::Found(FlatRecord::new(id).with_title(format!("Movie {id}")))
        }
    }
}

#[derive(Default)]
struct CountingThrottle {
    pauses: usize,
}

impl Throttle for CountingThrottle {
    fn pause(&mut self) {
        self.pauses += 1;
    }
}

fn options(dir: &Path) -> SyncOptions {
    SyncOptions::new(
        dir.join("cache").join("tmdb_data.csv"),
        dir.join("cache").join("tmdb_id_cache.json"),
    )
}

fn ids(range: std::ops::RangeInclusive<MovieId>) -> Vec<MovieQuery> {
    range.map(MovieQuery::Id).collect()
}

fn checkpoints(events: &[SyncEvent]) -> Vec<(usize, usize, usize)> {
    events
        .iter()
        .filter_map(|e| match e {
            SyncEvent::Checkpoint {
                processed,
                written,
                total_rows,
            } => Some((*processed, *written, *total_rows)),
            _ => None,
        })
        .collect()
}

#[test]
fn thirty_ids_checkpoint_after_25_and_at_end() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let mut table = CachedTable::new();
    let mut id_cache = IdCache::new();
    let mut source = FakeSource::default();
    let mut events = Vec::new();

    let report = synchronize(
        &ids(1..=30),
        &mut table,
        &mut id_cache,
        &mut source,
        &mut NoDelay,
        &opts,
        &mut |e| events.push(e),
    )
    .unwrap();

    assert_eq!(report.processed, 30);
    assert_eq!(report.found, 30);
    assert_eq!(report.checkpoints, 2);
    assert_eq!(checkpoints(&events), vec![(25, 25, 25), (30, 5, 30)]);

    let on_disk = CachedTable::load(&opts.table_path).unwrap();
    assert_eq!(on_disk.len(), 30);
    assert_eq!(on_disk.ids().len(), 30);
}

#[test]
fn cached_ids_cause_no_fetches() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let mut table = CachedTable::from_records((1..=10).map(FlatRecord::new));
    let mut id_cache = IdCache::new();
    let mut source = FakeSource::default();

    let report = synchronize(
        &ids(1..=15),
        &mut table,
        &mut id_cache,
        &mut source,
        &mut NoDelay,
        &opts,
        &mut |_| {},
    )
    .unwrap();

    assert_eq!(report.skipped, 10);
    assert_eq!(source.calls, ids(11..=15));
    assert_eq!(table.len(), 15);
}

#[test]
fn second_run_leaves_table_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let pending = ids(100..=104);

    let mut table = CachedTable::new();
    let mut id_cache = IdCache::new();
    synchronize(
        &pending,
        &mut table,
        &mut id_cache,
        &mut FakeSource::default(),
        &mut NoDelay,
        &opts,
        &mut |_| {},
    )
    .unwrap();
    let before = std::fs::read(&opts.table_path).unwrap();

    let mut table = CachedTable::load(&opts.table_path).unwrap();
    let mut id_cache = IdCache::load(&opts.id_cache_path).unwrap();
    let mut source = FakeSource::default();
    let report = synchronize(
        &pending,
        &mut table,
        &mut id_cache,
        &mut source,
        &mut NoDelay,
        &opts,
        &mut |_| {},
    )
    .unwrap();

    assert!(source.calls.is_empty());
    assert_eq!(report.checkpoints, 0);
    assert_eq!(std::fs::read(&opts.table_path).unwrap(), before);
}

#[test]
fn failures_count_toward_checkpoint_cadence() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(dir.path());
    opts.checkpoint_every = 3;
    let mut source = FakeSource {
        missing: HashSet::from([2]),
        broken: HashSet::from([3]),
        ..FakeSource::default()
    };
    let mut table = CachedTable::new();
    let mut id_cache = IdCache::new();
    let mut events = Vec::new();

    let report = synchronize(
        &ids(1..=4),
        &mut table,
        &mut id_cache,
        &mut source,
        &mut NoDelay,
        &opts,
        &mut |e| events.push(e),
    )
    .unwrap();

    assert_eq!(report.found, 2);
    assert_eq!(report.failed, 2);
    assert_eq!(checkpoints(&events), vec![(3, 1, 1), (4, 1, 2)]);
}

#[test]
fn all_failures_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let mut source = FakeSource {
        broken: (1..=3).collect(),
        ..FakeSource::default()
    };

    let report = synchronize(
        &ids(1..=3),
        &mut CachedTable::new(),
        &mut IdCache::new(),
        &mut source,
        &mut NoDelay,
        &opts,
        &mut |_| {},
    )
    .unwrap();

    assert_eq!(report.failed, 3);
    assert_eq!(report.checkpoints, 0);
    assert!(!opts.table_path.exists());
}

#[test]
fn throttle_pauses_after_every_fetched_item() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let mut throttle = CountingThrottle::default();
    let mut source = FakeSource {
        missing: HashSet::from([2]),
        ..FakeSource::default()
    };

    synchronize(
        &ids(1..=4),
        &mut CachedTable::new(),
        &mut IdCache::new(),
        &mut source,
        &mut throttle,
        &opts,
        &mut |_| {},
    )
    .unwrap();

    // Found, not-found and the last item all pause.
    assert_eq!(throttle.pauses, 4);
}

#[test]
fn limit_caps_fetches_after_skipping() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(dir.path());
    opts.limit = Some(2);
    let mut table = CachedTable::from_records([FlatRecord::new(1)]);
    let mut source = FakeSource::default();

    let report = synchronize(
        &ids(1..=5),
        &mut table,
        &mut IdCache::new(),
        &mut source,
        &mut NoDelay,
        &opts,
        &mut |_| {},
    )
    .unwrap();

    assert_eq!(source.calls, ids(2..=3));
    assert_eq!(report.skipped, 1);
    assert_eq!(report.total_rows, 3);
}

#[test]
fn title_queries_fill_id_cache_and_are_skipped_next_time() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let pending = vec![
        MovieQuery::title("Stalker", Some(1979)),
        MovieQuery::title("Unknown Film", None),
    ];
    let mut source = FakeSource {
        title_ids: vec![("Stalker".to_string(), 1398)],
        ..FakeSource::default()
    };
    let mut table = CachedTable::new();
    let mut id_cache = IdCache::new();

    synchronize(
        &pending,
        &mut table,
        &mut id_cache,
        &mut source,
        &mut NoDelay,
        &opts,
        &mut |_| {},
    )
    .unwrap();

    let saved = IdCache::load(&opts.id_cache_path).unwrap();
    assert_eq!(saved.get("Stalker (1979)"), Some(1398));
    assert_eq!(saved.len(), 1);

    let mut again = FakeSource::default();
    let report = synchronize(
        &pending,
        &mut table,
        &mut id_cache,
        &mut again,
        &mut NoDelay,
        &opts,
        &mut |_| {},
    )
    .unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(again.calls, vec![MovieQuery::title("Unknown Film", None)]);
}

#[test]
fn refetched_duplicate_replaces_row() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let pending = vec![MovieQuery::Id(7), MovieQuery::Id(7)];
    let mut table = CachedTable::new();

    synchronize(
        &pending,
        &mut table,
        &mut IdCache::new(),
        &mut FakeSource::default(),
        &mut NoDelay,
        &opts,
        &mut |_| {},
    )
    .unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(CachedTable::load(&opts.table_path).unwrap().len(), 1);
}
