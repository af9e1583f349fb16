//! Logger setup: `log::info!` is the CLI's normal output channel.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Crates whose `info!` output is shown to the user.
const OWN_CRATES: [&str; 3] = ["gams", "gams_lib", "gams_catalog"];

/// Install the global logger.
///
/// `quiet` limits output to warnings and errors, `verbose` adds debug
/// messages with timestamps. With a `logfile`, everything written to the
/// terminal is also appended there with ANSI escapes removed.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let file = match logfile {
        Some(path) => Some(File::options().create(true).append(true).open(path)?),
        None => None,
    };

    let mut builder = Builder::new();
    // Dependencies only get to speak up about problems.
    builder.filter_level(LevelFilter::Warn);
    for krate in OWN_CRATES {
        builder.filter_module(krate, level);
    }
    builder
        .target(Target::Pipe(Box::new(TeeWriter {
            out: io::stdout(),
            file,
        })))
        .format(move |buf, record| {
            if verbose {
                write!(
                    buf,
                    "{} {:<5} ",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                )?;
            }
            match record.level() {
                Level::Error => write!(
                    buf,
                    "{} ",
                    "error:".if_supports_color(Stdout, |t| t.red())
                )?,
                Level::Warn => write!(
                    buf,
                    "{} ",
                    "warning:".if_supports_color(Stdout, |t| t.yellow())
                )?,
                _ => {}
            }
            writeln!(buf, "{}", record.args())
        })
        .try_init()
        .map_err(io::Error::other)
}

/// Writes to stdout and, when present, to a log file without ANSI escapes.
struct TeeWriter {
    out: io::Stdout,
    file: Option<File>,
}

impl Write for TeeWriter {
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
