// ./src/logging.rs

use chrono::Local;
use log::{LevelFilter, Metadata, SetLoggerError};

/// Stdout logger for the proof task, integrated with the `log` crate.
///
/// The platform captures stdout of the task container, so everything goes
/// there with a timestamp and the emitting module.
pub struct ProofLogger;

impl log::Log for ProofLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            println!("{}", format_record(record));
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &log::Record) -> String {
    format!(
        "[{}][{}] {}: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        record.level(),
        record.target(),
        record.args()
    )
}

/// Maps a `RUST_LOG`-style level name to a filter. Unknown names fall back to info.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Installs [`ProofLogger`] with the given level filter. Later calls are no-ops.
pub fn init_logger(level_filter: LevelFilter) -> Result<(), SetLoggerError> {
    static INIT: std::sync::Once = std::sync::Once::new();
    let mut result = Ok(());
    INIT.call_once(|| {
        result = log::set_logger(&ProofLogger).map(|()| log::set_max_level(level_filter));
    });
    result
}

/// Installs the logger using `RUST_LOG`, defaulting to info.
pub fn init_from_env() -> Result<(), SetLoggerError> {
    let level = std::env::var("RUST_LOG").unwrap_or_default();
    init_logger(parse_level(&level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level(""), LevelFilter::Info);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }

    #[test]
    fn test_format_record() {
        let line = format_record(
            &log::Record::builder()
                .level(Level::Warn)
                .target("sleep_proof::proof")
                .args(format_args!("{}", "data key is missing"))
                .build(),
        );
        assert!(line.ends_with("[WARN] sleep_proof::proof: data key is missing"));
    }

    #[test]
    fn test_logger_initialization() {
        assert!(init_logger(LevelFilter::Debug).is_ok());
        assert!(init_logger(LevelFilter::Debug).is_ok());
        log::info!("Testing info log through `log` crate");
    }
}
