//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use reelstats_dashboard::{FilterSelection, Toggle};

#[derive(Parser)]
#[command(name = "reelstats")]
#[command(
    about = "Fetch movie metadata from TMDb, cache it locally and chart it",
    long_about = None
)]
pub(crate) struct Cli {
    /// Data directory (defaults to settings.toml, then ./data)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch metadata for every pending movie not yet in the cache
    Fetch(FetchArgs),

    /// Resolve and fetch a single movie without touching the cache
    Lookup(LookupArgs),

    /// Derive the analytical table from the cached table
    Prepare,

    /// Build the filtered dashboard page
    Dashboard(DashboardArgs),

    /// Inspect the local cache files
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Manage the TMDb API key
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
pub(crate) struct FetchArgs {
    /// Pending movies CSV (default: <data-dir>/raw/sample_movies.csv)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Fetch at most this many movies
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Save progress after this many movies (0 = only at the end)
    #[arg(long, default_value_t = reelstats_cache::sync::DEFAULT_CHECKPOINT_EVERY)]
    pub checkpoint_every: usize,

    /// Skip the random pause between requests
    #[arg(long)]
    pub no_delay: bool,
}

#[derive(Args)]
#[command(group(clap::ArgGroup::new("target").required(true).args(["id", "title"])))]
pub(crate) struct LookupArgs {
    /// TMDb movie id
    #[arg(long)]
    pub id: Option<u64>,

    /// Title to search for
    #[arg(long)]
    pub title: Option<String>,

    /// Release year to narrow the title search
    #[arg(long, requires = "title")]
    pub year: Option<i32>,
}

#[derive(Args)]
pub(crate) struct DashboardArgs {
    /// Main production country (repeatable)
    #[arg(long = "country")]
    pub countries: Vec<String>,

    /// Decade label such as 1990s (repeatable)
    #[arg(long = "decade")]
    pub decades: Vec<String>,

    /// Main language (repeatable)
    #[arg(long = "language")]
    pub languages: Vec<String>,

    /// Genre; a movie matches if any of its genres is given (repeatable)
    #[arg(long = "genre")]
    pub genres: Vec<String>,

    /// USA as main country: all, only or exclude
    #[arg(long, default_value = "all")]
    pub usa: Toggle,

    /// English as main language: all, only or exclude
    #[arg(long, default_value = "all")]
    pub english: Toggle,

    /// Entries per top-N chart
    #[arg(long, default_value_t = reelstats_dashboard::DEFAULT_TOP_N)]
    pub top: usize,

    /// Output HTML file (default: <data-dir>/processed/dashboard.html)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl DashboardArgs {
    pub(crate) fn selection(&self) -> FilterSelection {
        FilterSelection {
            countries: self.countries.clone(),
            decades: self.decades.clone(),
            languages: self.languages.clone(),
            genres: self.genres.clone(),
            usa: self.usa,
            english: self.english,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// Show paths and row counts of the cache files
    Info,

    /// Compare the id cache against the cached table
    Check,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show where the API key comes from
    Show,

    /// Interactively save an API key
    Setup,

    /// Validate the API key against TMDb
    Test,

    /// Print the credentials file path
    Path,

    /// Save the default data directory to settings.toml
    DataDir {
        /// Directory to use when --data-dir is not given
        #[arg(required_unless_present = "clear")]
        path: Option<PathBuf>,

        /// Remove the saved data directory
        #[arg(long, conflicts_with = "path")]
        clear: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn dashboard_flags_build_selection() {
        let cli = Cli::parse_from([
            "reelstats",
            "dashboard",
            "--genre",
            "Drama",
            "--genre",
            "Crime",
            "--usa",
            "exclude",
        ]);
        let Commands::Dashboard(args) = cli.command else {
            panic!("expected dashboard");
        };
        let sel = args.selection();
        assert_eq!(sel.genres, ["Drama", "Crime"]);
        assert_eq!(sel.usa, Toggle::IsNot);
        assert_eq!(sel.english, Toggle::All);
    }

    #[test]
    fn lookup_requires_id_or_title() {
        assert!(Cli::try_parse_from(["reelstats", "lookup"]).is_err());
        assert!(Cli::try_parse_from(["reelstats", "lookup", "--year", "1994"]).is_err());
        assert!(Cli::try_parse_from(["reelstats", "lookup", "--id", "11104"]).is_ok());
    }
}
