use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use reelstats_cache::{CacheCheck, CachedTable, IdCache};
use reelstats_core::util::format_bytes_approx;
use reelstats_lib::AppConfig;

use crate::error::CliError;

/// Show paths, sizes and row counts of the cache files.
pub(crate) fn run_cache_info(config: &AppConfig) -> Result<(), CliError> {
    let table_path = config.paths.cached_table();
    let id_cache_path = config.paths.id_cache();

    log::info!("{}", "Cache files".if_supports_color(Stdout, |t| t.bold()));
    log::info!("");

    if table_path.exists() {
        let table = CachedTable::load(&table_path)?;
        log_file("Cached table", &table_path, &format!("{} movies", table.len()));
    } else {
        log_missing("Cached table", &table_path);
    }

    if id_cache_path.exists() {
        let id_cache = IdCache::load(&id_cache_path)?;
        log_file("Id cache", &id_cache_path, &format!("{} titles", id_cache.len()));
    } else {
        log_missing("Id cache", &id_cache_path);
    }

    let analytical = config.paths.analytical_table();
    if analytical.exists() {
        log_file("Analytical table", &analytical, "prepared");
    } else {
        log_missing("Analytical table", &analytical);
    }
    Ok(())
}

/// Compare the id cache against the cached table.
pub(crate) fn run_cache_check(config: &AppConfig) -> Result<(), CliError> {
    let table = CachedTable::load(&config.paths.cached_table())?;
    let id_cache = IdCache::load(&config.paths.id_cache())?;
    let check = CacheCheck::compare(&id_cache, &table);

    log::info!("{}", "Cache consistency".if_supports_color(Stdout, |t| t.bold()));
    log::info!("");
    log::info!("  Id cache entries:       {}", check.id_cache_entries);
    log::info!("  Cached table rows:      {}", check.table_rows);
    log::info!("  Ids in both:            {}", check.in_both);
    log::info!(
        "  Missing from table:     {}",
        check.missing_in_table.len()
    );
    log::info!(
        "  Not in id cache:        {} {}",
        check.missing_in_id_cache.len(),
        "(expected for rows fetched by id)".if_supports_color(Stdout, |t| t.dimmed())
    );

    for id in &check.missing_in_id_cache {
        if let Some(record) = table.get(*id) {
            log::debug!("    tmdb:{} {}", id, record.display_title());
        }
    }

    if !check.is_consistent() {
        log::info!("");
        log::warn!(
            "{} Ids in the id cache without a cached row:",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
        for (title, id) in id_cache.iter() {
            if check.missing_in_table.contains(&id) {
                log::warn!("    {} -> tmdb:{}", title, id);
            }
        }
        log::warn!("Run 'reelstats fetch' to fill them in.");
    } else {
        log::info!("");
        log::info!(
            "{} Every resolved title has a cached row",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
    }
    Ok(())
}

fn log_file(label: &str, path: &Path, detail: &str) {
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    log::info!(
        "  {} {}",
        format!("{}:", label).if_supports_color(Stdout, |t| t.bold()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("    {}, {}", detail, format_bytes_approx(size));
}

fn log_missing(label: &str, path: &Path) {
    log::info!(
        "  {} {} {}",
        format!("{}:", label).if_supports_color(Stdout, |t| t.bold()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
    );
}
