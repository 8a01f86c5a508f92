use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// Colored `HH:MM:SS.mmm - LEVEL - message` lines on stderr, keeping stdout
/// free for the report and for `--stdout` documents.
pub struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let (color_code, reset_code) = color_codes(record.level());
            let _ = writeln!(
                std::io::stderr().lock(),
                "{}{} - {} - {}{}",
                color_code,
                formatted_time(SystemTime::now()),
                record.level(),
                record.args(),
                reset_code
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Maps the number of `-v` flags to a level filter, starting from warnings.
pub fn level_from_verbosity(occurrences: u64) -> LevelFilter {
    match occurrences {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn formatted_time(now: SystemTime) -> String {
    let duration = now.duration_since(UNIX_EPOCH).unwrap_or_default();
    let secs = duration.as_secs();

    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, duration.subsec_millis())
}

fn color_codes(level: Level) -> (&'static str, &'static str) {
    match level {
        Level::Error => ("\x1b[31m", "\x1b[0m"), // Red
        Level::Warn => ("\x1b[33m", "\x1b[0m"),  // Yellow
        Level::Info => ("\x1b[32m", "\x1b[0m"),  // Green
        Level::Debug => ("\x1b[36m", "\x1b[0m"), // Cyan
        Level::Trace => ("\x1b[35m", "\x1b[0m"), // Magenta
    }
}
