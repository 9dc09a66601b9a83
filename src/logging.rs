//! Logging setup for the binary
//!
//! The TUI owns the terminal, so its logs go to a file that is truncated on
//! every start. One-shot commands log to stderr. Library code only emits
//! `tracing` events and never installs a subscriber itself.

use crate::error::HolocronError;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Where log lines end up
#[derive(Debug, Clone)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// `holocron.log` in the executable's directory
pub fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("holocron.log")
}

pub fn parse_level(level: &str) -> crate::Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| HolocronError::InvalidLogLevel(level.to_string()))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(level: &str, target: LogTarget) -> crate::Result<()> {
    let filter = EnvFilter::default().add_directive(parse_level(level)?.into());

    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .map_err(|e| HolocronError::LogFileError(path.display().to_string(), e))?;

            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_levels() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(matches!(
            parse_level("verbose"),
            Err(HolocronError::InvalidLogLevel(l)) if l == "verbose"
        ));
    }

    #[test]
    fn default_path_is_named_after_the_app() {
        assert!(default_log_path().ends_with("holocron.log"));
    }
}
