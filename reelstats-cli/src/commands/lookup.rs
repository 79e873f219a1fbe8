use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use reelstats_core::{FetchOutcome, FlatRecord, MovieQuery};
use reelstats_tmdb::{ApiKey, TmdbClient, fetch_movie};

use crate::cli_types::LookupArgs;
use crate::error::CliError;

/// Resolve and fetch one movie, printing its flattened record.
pub(crate) fn run_lookup(api_key: ApiKey, args: LookupArgs) -> Result<(), CliError> {
    let query = match (args.id, args.title) {
        (Some(id), _) => MovieQuery::Id(id),
        (None, Some(title)) => MovieQuery::title(title, args.year),
        (None, None) => return Err(CliError::other("Pass --id or --title")),
    };

    let client = TmdbClient::new(api_key)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.set_message(format!("Looking up {}...", query));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let outcome = fetch_movie(&client, &query);
    pb.finish_and_clear();

    match outcome {
        FetchOutcome::Found(record) => {
            print_record(&record);
            Ok(())
        }
        FetchOutcome::NotFound => Err(CliError::other(format!("No TMDb match for {}", query))),
        FetchOutcome::Failed(reason) => Err(CliError::other(format!(
            "Lookup of {} failed: {}",
            query, reason
        ))),
    }
}

fn print_record(record: &FlatRecord) {
    log::info!(
        "{} {} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        record.display_title().if_supports_color(Stdout, |t| t.bold()),
        format!("(tmdb:{})", record.tmdb_id).if_supports_color(Stdout, |t| t.dimmed()),
    );

    let runtime = record.runtime.map(|m| format!("{} min", m));
    let fields = [
        ("Release date", record.release_date.as_deref()),
        ("Runtime", runtime.as_deref()),
        ("Genres", record.genres.as_deref()),
        ("Languages", record.spoken_languages.as_deref()),
        ("Countries", record.production_countries.as_deref()),
        ("Directors", record.directors.as_deref()),
        ("Screenwriters", record.screenwriters.as_deref()),
        ("Cinematographers", record.cinematographers.as_deref()),
        ("Cast", record.actors.as_deref()),
    ];
    for (name, value) in fields {
        match value {
            Some(v) => log::info!(
                "  {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                v
            ),
            None => log::info!(
                "  {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                "-".if_supports_color(Stdout, |t| t.dimmed())
            ),
        }
    }
}
