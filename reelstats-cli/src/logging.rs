//! Logger setup: all user-facing output goes through `log`.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

/// Writes to the terminal side unchanged and, if set, appends a copy with
/// ANSI escapes removed.
struct Tee<O, F> {
    out: O,
    file: Option<F>,
}

impl<O: Write, F: Write> Write for Tee<O, F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

/// `quiet` shows warnings and errors only; `verbose` adds debug messages and
/// timestamps. Otherwise messages are printed bare at info level.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let file: Option<File> = match logfile {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };

    builder(
        level,
        verbose,
        Box::new(Tee {
            out: io::stdout(),
            file,
        }),
    )
    .init();
    Ok(())
}

fn builder(level: LevelFilter, verbose: bool, sink: Box<dyn Write + Send>) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        // HTTP stack internals are noise even with --verbose.
        .filter_module("hyper", LevelFilter::Info)
        .filter_module("hyper_util", LevelFilter::Info)
        .filter_module("reqwest", LevelFilter::Info)
        .filter_module("rustls", LevelFilter::Info)
        // owo-colors already decides per stream; a pipe target would strip it.
        .write_style(WriteStyle::Always)
        .target(Target::Pipe(sink));

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder
}
