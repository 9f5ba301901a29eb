// src/logging.rs

//! Logging setup for `xjfx` using `tracing` + `tracing-subscriber`.
//!
//! The library only emits `tracing` events; nothing is printed until a
//! program calls [`init_logging`].
//!
//! Priority for determining the log level:
//! 1. the `level` argument (e.g. from `--log-level`)
//! 2. `XJFX_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs are sent to STDERR so that stdout stays free for command output.

use std::sync::Once;

use anyhow::Result;
use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::fmt;

static INIT: Once = Once::new();

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Install the global subscriber.
///
/// Idempotent: only the first call has an effect, later calls return
/// `Ok(())`. If another global subscriber was installed elsewhere (a test
/// harness, an embedding application), that one stays in place.
pub fn init_logging(level: Option<LogLevel>) -> Result<()> {
    let level = resolve_level(level);

    INIT.call_once(|| {
        let _ = fmt()
            .with_max_level(level)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .try_init();
    });

    Ok(())
}

impl From<LogLevel> for Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Effective level for a given CLI choice, consulting `XJFX_LOG` when there
/// is none. Unparsable values fall back to `info`.
pub fn resolve_level(level: Option<LogLevel>) -> Level {
    match level {
        Some(lvl) => lvl.into(),
        None => std::env::var("XJFX_LOG")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(Level::INFO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_wins() {
        assert_eq!(resolve_level(Some(LogLevel::Trace)), Level::TRACE);
    }

    #[test]
    fn cli_levels_map_onto_tracing_levels() {
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Debug), Level::DEBUG);
    }

    #[test]
    fn init_twice_is_fine() {
        init_logging(Some(LogLevel::Warn)).unwrap();
        init_logging(Some(LogLevel::Debug)).unwrap();
    }
}
