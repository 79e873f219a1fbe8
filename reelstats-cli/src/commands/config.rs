use std::io::Write;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use reelstats_lib::AppConfig;
use reelstats_tmdb::{ApiKey, CredentialSource, TmdbClient};

use crate::error::CliError;

/// Show where the API key comes from and which data directory is in use.
pub(crate) fn run_config_show(config: &AppConfig) -> Result<(), CliError> {
    let path = reelstats_tmdb::config_path();
    let source = reelstats_tmdb::api_key_source();

    log::info!(
        "{}",
        "TMDb Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }

    let source_str = format!("({})", source);
    match (&source, ApiKey::load()) {
        (CredentialSource::Missing, _) | (_, Err(_)) => {
            log::info!(
                "  {} {} {}",
                "api_key:".if_supports_color(Stdout, |t| t.cyan()),
                "not set".if_supports_color(Stdout, |t| t.yellow()),
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        (_, Ok(key)) => {
            log::info!(
                "  {} {} {}",
                "api_key:".if_supports_color(Stdout, |t| t.cyan()),
                key.masked(),
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }

    log::info!("");
    log::info!(
        "  Data directory: {} {}",
        config.paths.root.display().if_supports_color(Stdout, |t| t.cyan()),
        format!("({})", config.data_dir_source).if_supports_color(Stdout, |t| t.dimmed()),
    );
    if let Some(settings) = reelstats_lib::settings::load_settings_string() {
        log::info!("");
        log::info!(
            "  {}",
            "settings.toml:".if_supports_color(Stdout, |t| t.dimmed())
        );
        for line in settings.lines() {
            log::info!("    {}", line);
        }
    }
    Ok(())
}

/// Prompt for an API key and save it to the credentials file.
pub(crate) fn run_config_setup() -> Result<(), CliError> {
    println!(
        "{}",
        "TMDb API Key Setup".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();
    println!(
        "  {}",
        "Create a key at https://www.themoviedb.org/settings/api"
            .if_supports_color(Stdout, |t| t.dimmed()),
    );

    let existing = ApiKey::load().ok();
    let key = loop {
        match &existing {
            Some(k) => print!("  api_key [{}]: ", k.masked()),
            None => print!("  api_key: "),
        }
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let trimmed = input.trim();

        if trimmed.is_empty() {
            if let Some(k) = &existing {
                break k.clone();
            }
            println!(
                "    {}",
                "This field is required.".if_supports_color(Stdout, |t| t.yellow()),
            );
            continue;
        }
        break ApiKey::new(trimmed)?;
    };

    let path = reelstats_tmdb::save_to_file(&key)?;
    println!();
    println!(
        "{} API key saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if matches!(
        reelstats_tmdb::api_key_source(),
        CredentialSource::EnvVar(_)
    ) {
        println!(
            "  {}",
            "Note: the environment variable still takes precedence."
                .if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    Ok(())
}

/// Validate the API key against TMDb.
pub(crate) fn run_config_test(quiet: bool) -> Result<(), CliError> {
    let key = ApiKey::load()?;
    log::info!("Testing API key against TMDb...");

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        pb.set_message("Connecting...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    };

    let result = TmdbClient::new(key).and_then(|client| client.validate());
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            log::info!(
                "{} API key is valid!",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            );
            Ok(())
        }
        Err(e) => Err(CliError::config(format!("API key validation failed: {}", e))),
    }
}

/// Print the credentials file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match reelstats_tmdb::config_path() {
        Some(path) => {
            log::info!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::config("Could not determine config directory")),
    }
}

/// Save (or clear, when `path` is `None`) the default data directory.
pub(crate) fn run_config_data_dir(path: Option<std::path::PathBuf>) -> Result<(), CliError> {
    reelstats_lib::settings::save_data_dir(path.as_deref())?;
    let settings = reelstats_lib::settings::settings_path();
    match path {
        Some(p) => log::info!(
            "{} Data directory set to {} in {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            settings.display(),
        ),
        None => log::info!(
            "{} Data directory cleared from {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            settings.display(),
        ),
    }
    Ok(())
}
