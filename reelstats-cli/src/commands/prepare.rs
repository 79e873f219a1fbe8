use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use reelstats_lib::AppConfig;

use crate::error::CliError;

/// Derive the analytical table from the cached table.
pub(crate) fn run_prepare(config: &AppConfig) -> Result<(), CliError> {
    let input = config.paths.cached_table();
    let output = config.paths.analytical_table();

    let summary = reelstats_lib::run_prepare(&input, &output)?;

    log::info!(
        "{} Wrote {} rows to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.rows,
        output.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if summary.undated > 0 {
        log::warn!(
            "{} {} rows have no usable release date (empty year and decade)",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            summary.undated,
        );
    }
    Ok(())
}
