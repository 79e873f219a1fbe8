//! reelstats CLI
//!
//! Fetches movie metadata from TMDb into a local cache, derives an analytical
//! table from it, and renders a filterable dashboard.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use reelstats_lib::AppConfig;
use reelstats_tmdb::ApiKey;

use cli_types::{CacheAction, Cli, Commands, ConfigAction};
use error::CliError;

fn main() {
    // A missing .env is fine; the key may come from the real environment.
    let dotenv_path = dotenv::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }
    if let Some(path) = dotenv_path {
        log::debug!("Loaded environment from {}", path.display());
    }

    let config = AppConfig::resolve(cli.data_dir.clone());
    log::debug!(
        "Data directory: {} (from {})",
        config.paths.root.display(),
        config.data_dir_source
    );

    if let Err(e) = run(cli, &config) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &AppConfig) -> Result<(), CliError> {
    match cli.command {
        Commands::Fetch(args) => {
            let api_key = ApiKey::load()?;
            commands::fetch::run_fetch(config, api_key, args, cli.quiet)
        }
        Commands::Lookup(args) => {
            let api_key = ApiKey::load()?;
            commands::lookup::run_lookup(api_key, args)
        }
        Commands::Prepare => commands::prepare::run_prepare(config),
        Commands::Dashboard(args) => commands::dashboard::run_dashboard(config, args),
        Commands::Cache { action } => match action {
            CacheAction::Info => commands::cache::run_cache_info(config),
            CacheAction::Check => commands::cache::run_cache_check(config),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(config),
            ConfigAction::Setup => commands::config::run_config_setup(),
            ConfigAction::Test => commands::config::run_config_test(cli.quiet),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::DataDir { path, .. } => commands::config::run_config_data_dir(path),
        },
    }
}
