use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use reelstats_dashboard::{BarChart, FilterOptions, build_view, html};
use reelstats_lib::{AppConfig, read_analytical};

use crate::cli_types::DashboardArgs;
use crate::error::CliError;

/// Build the filtered dashboard, print its summary and write the HTML page.
pub(crate) fn run_dashboard(config: &AppConfig, args: DashboardArgs) -> Result<(), CliError> {
    let input = config.paths.analytical_table();
    if !input.exists() {
        return Err(CliError::other(format!(
            "Analytical table not found at {}. Run 'reelstats prepare' first",
            input.display()
        )));
    }

    let rows = read_analytical(&input)?;
    let selection = args.selection();
    let options = FilterOptions::from_rows(&rows);
    let view = build_view(&rows, &selection, args.top);

    log::info!("{}", "Summary".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Total movies watched: {} of {}", view.total, rows.len());
    for (name, value) in selection.describe() {
        log::info!(
            "  {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            value
        );
    }

    for id in ["directors", "actors", "genres", "countries"] {
        if let Some(chart) = view.chart(id) {
            print_top(chart);
        }
    }

    let output = args.output.unwrap_or_else(|| config.paths.dashboard());
    let page = html::render(&view, &options);
    html::write_page(&output, &page)?;

    log::info!("");
    log::info!(
        "{} Dashboard written to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        output.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

fn print_top(chart: &BarChart) {
    log::info!("");
    log::info!("{}", chart.title.if_supports_color(Stdout, |t| t.bold()));
    if chart.bars.is_empty() {
        log::info!("  {}", "no data".if_supports_color(Stdout, |t| t.dimmed()));
        return;
    }
    let width = chart.bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    for bar in &chart.bars {
        log::info!("  {:<width$}  {}", bar.label, bar.count, width = width);
    }
}
