//! Module with the logging facilities.
//!
//! The standard `log` macros used throughout the crate are routed
//! through slog, with a simple single-line stderr format.

use std::env;
use std::io::{self, Write};

use ansi_term::Colour;
use isatty;
use log::SetLoggerError;
use slog::{DrainExt, FilterLevel, Level, Logger, OwnedKeyValueList, Record};
use slog_envlogger::LogBuilder;
use slog_stdlog;
use slog_stream;
use time;


/// Initialize logging for given verbosity level.
///
/// Verbosity is the count of -v flags from the command line
/// (or negative count of -q flags).
/// Directives from the RUST_LOG environment variable, if any,
/// are layered on top.
pub fn init(verbosity: isize) -> Result<(), SetLoggerError> {
    let istty = isatty::stderr_isatty();
    let drain = slog_stream::stream(io::stderr(), LogFormat{tty: istty});

    let mut builder = LogBuilder::new(drain);
    builder = builder.filter(None, filter_level(verbosity));
    if let Ok(ref conf) = env::var("RUST_LOG") {
        builder = builder.parse(conf);
    }

    let logger = Logger::root(builder.build().fuse(), o!());
    slog_stdlog::set_logger(logger)
}

/// Translate the count of -v / -q flags into a log filtering level.
fn filter_level(verbosity: isize) -> FilterLevel {
    match verbosity {
        n if n < -2 => FilterLevel::Off,
        -2 => FilterLevel::Error,
        -1 => FilterLevel::Warning,
        0 => FilterLevel::Info,
        1 => FilterLevel::Debug,
        _ => FilterLevel::Trace,
    }
}


const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%SZ";

/// Single-line log format, colorized if the output is a terminal.
struct LogFormat {
    tty: bool,
}

impl slog_stream::Format for LogFormat {
    fn format(&self, io: &mut Write,
              record: &Record, _logger_kvp: &OwnedKeyValueList) -> io::Result<()> {
        let timestamp = time::strftime(TIMESTAMP_FORMAT, &time::now_utc())
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        let level = record.level().as_short_str();
        let level = if self.tty {
            format!("{}", level_color(record.level()).paint(level))
        } else {
            level.to_owned()
        };

        writeln!(io, "{} {} [{}] {}",
            timestamp, level, record.module(), record.msg())
    }
}

/// Color that given log level should be painted with on a terminal.
fn level_color(level: Level) -> Colour {
    match level {
        Level::Critical | Level::Error => Colour::Red,
        Level::Warning => Colour::Yellow,
        Level::Info => Colour::Green,
        Level::Debug => Colour::Cyan,
        Level::Trace => Colour::White,
    }
}


#[cfg(test)]
mod tests {
    use slog::FilterLevel;
    use spectral::prelude::*;
    use super::filter_level;

    #[test]
    fn default_verbosity_is_info() {
        assert_that!(filter_level(0)).is_equal_to(FilterLevel::Info);
    }

    #[test]
    fn verbosity_extremes_saturate() {
        assert_that!(filter_level(100)).is_equal_to(FilterLevel::Trace);
        assert_that!(filter_level(-100)).is_equal_to(FilterLevel::Off);
    }
}
