use chrono::Utc;
use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;

/// A logger that writes one line per record to stdout.
///
/// Line format: `<UTC timestamp> <LEVEL> <target>: <message>`.
pub struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        println!(
            "{} {:<5} {}: {}",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Parse a `GAZE_LOG` value. Unknown values fall back to `Info`.
pub fn parse_level(value: &str) -> LevelFilter {
    match value.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn level_from_env() -> LevelFilter {
    match std::env::var("GAZE_LOG") {
        Ok(value) => parse_level(&value),
        Err(_) => {
            if cfg!(debug_assertions) {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            }
        }
    }
}

/// Initialize the global logger with `StdoutLogger`.
///
/// The max level comes from `GAZE_LOG` when set, otherwise Debug in debug
/// builds and Info in release builds. This can only be called once per
/// process; subsequent calls are silently ignored.
pub fn init_stdout_logger() {
    static LOGGER: StdoutLogger = StdoutLogger;

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_from_env());
    }
}

/// Log a fatal error and exit the process.
///
/// Logs at Error level (the log crate has no Fatal level), flushes the
/// logger, and exits with status 1.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
        log::logger().flush();
        std::process::exit(1)
    }};
}
