use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use reelstats_cache::{
    CachedTable, IdCache, NoDelay, RandomDelay, SyncEvent, SyncOptions, Throttle, load_pending,
    synchronize,
};
use reelstats_lib::AppConfig;
use reelstats_tmdb::{ApiKey, TmdbClient, TmdbFetcher};

use crate::cli_types::FetchArgs;
use crate::error::CliError;

/// Fetch every pending movie that is not cached yet.
pub(crate) fn run_fetch(
    config: &AppConfig,
    api_key: ApiKey,
    args: FetchArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let paths = &config.paths;
    let input = args.input.unwrap_or_else(|| paths.pending_input());
    if !input.exists() {
        return Err(CliError::other(format!(
            "Pending movies file not found: {}",
            input.display()
        )));
    }

    let pending = load_pending(&input)?;
    let mut table = CachedTable::load(&paths.cached_table())?;
    let mut id_cache = IdCache::load(&paths.id_cache())?;

    log::info!(
        "{}",
        "Fetching movie metadata from TMDb".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  Input:  {}",
        input.display().if_supports_color(Stdout, |t| t.cyan())
    );
    log::info!(
        "  Cache:  {} ({} rows)",
        paths.cached_table().display().if_supports_color(Stdout, |t| t.cyan()),
        table.len()
    );
    log::info!("");

    let mut fetcher = TmdbFetcher::new(TmdbClient::new(api_key)?);
    let mut throttle: Box<dyn Throttle> = if args.no_delay {
        Box::new(NoDelay)
    } else {
        Box::new(RandomDelay::default())
    };

    let mut options = SyncOptions::new(paths.cached_table(), paths.id_cache());
    options.checkpoint_every = args.checkpoint_every;
    options.limit = args.limit;

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {wide_msg}")
                .expect("static pattern")
                .progress_chars("=> "),
        );
        pb
    };

    let mut on_event = |event: SyncEvent| match event {
        SyncEvent::Started {
            pending,
            skipped,
            to_fetch,
        } => {
            pb.suspend(|| {
                log::info!(
                    "{} pending, {} already cached, {} to fetch",
                    pending,
                    skipped,
                    to_fetch
                );
            });
            pb.set_length(to_fetch as u64);
        }
        SyncEvent::ItemStarted { query, .. } => {
            pb.set_message(query);
        }
        SyncEvent::ItemFound { title, .. } => {
            pb.set_message(title);
            pb.inc(1);
        }
        SyncEvent::ItemNotFound { query, .. } => {
            pb.suspend(|| {
                log::warn!(
                    "{} Not found: {}",
                    "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                    query
                );
            });
            pb.inc(1);
        }
        SyncEvent::ItemFailed { query, reason, .. } => {
            pb.suspend(|| {
                log::warn!(
                    "{} {}: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    query,
                    reason
                );
            });
            pb.inc(1);
        }
        SyncEvent::Checkpoint {
            processed,
            written,
            total_rows,
        } => {
            pb.suspend(|| {
                log::info!(
                    "{} Saved {} new rows after {} movies ({} total)",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    written,
                    processed,
                    total_rows
                );
            });
        }
        SyncEvent::Done => pb.finish_and_clear(),
    };

    let report = synchronize(
        &pending,
        &mut table,
        &mut id_cache,
        &mut fetcher,
        throttle.as_mut(),
        &options,
        &mut on_event,
    );
    pb.finish_and_clear();
    let report = report?;

    log::info!("");
    log::info!("{}", "Summary".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Fetched:  {}", report.found);
    log::info!("  Skipped:  {} (already cached)", report.skipped);
    if report.failed > 0 {
        log::info!(
            "  Failed:   {}",
            report.failed.if_supports_color(Stdout, |t| t.yellow())
        );
    }
    log::info!("  Rows:     {}", report.total_rows);
    log::info!("  Elapsed:  {:.1}s", report.elapsed.as_secs_f64());
    if report.found == 0 {
        log::info!(
            "{}",
            "Nothing new; cache files left untouched.".if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    Ok(())
}
