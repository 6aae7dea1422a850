//! Logging setup using `tracing` and `tracing-subscriber`
//!
//! The TUI owns the terminal, so interactive runs log to a file under the
//! data directory. Plain mode logs to stderr.
//!
//! # Log Levels
//!
//! - `warn`: forced finishes, recoverable config problems
//! - `info`: set completions, flow completion, screen changes
//! - `debug`: answers, rest start/finish
//! - `trace`: individual rest ticks

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::{PulseError, Result, APP_NAME, LOG_FILE};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// Single-line format
    Compact,
    /// JSON lines
    Json,
}

/// Configuration for logging behavior
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    /// Write to this file instead of stderr
    pub log_file: Option<PathBuf>,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::default(),
            log_file: None,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Map a `-v` count to a level: 0 info, 1 debug, 2+ trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Write to a file. ANSI colors are turned off for files.
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.with_ansi = path.is_none();
        self.log_file = path;
        self
    }

    /// Standard log file path: $DATA_HOME/pulsefit/pulsefit.log
    pub fn default_log_file() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            PulseError::ConfigError("Unable to determine data directory".to_string())
        })?;
        Ok(data_dir.join(APP_NAME).join(LOG_FILE))
    }
}

/// Build the env filter, letting `RUST_LOG` override the configured level
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", APP_NAME, level.as_str().to_lowercase())))
}

/// Initialize the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            init_logging_with_writer(config, Mutex::new(file))
        }
        None => init_logging_with_writer(config, std::io::stderr),
    }
}

/// Initialize logging with a custom writer
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config.level);
    let registry = tracing_subscriber::registry().with(filter);

    let outcome = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(config.with_ansi)
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_ansi(config.with_ansi)
                    .with_target(false)
                    .with_writer(writer),
            )
            .try_init(),
    };

    outcome.map_err(|e| PulseError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_verbosity() {
        assert_eq!(LogConfig::from_verbosity(0).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(1).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(5).level, Level::TRACE);
    }

    #[test]
    fn test_log_file_disables_ansi() {
        let config = LogConfig::default().with_log_file(Some(PathBuf::from("x.log")));
        assert!(!config.with_ansi);
        let config = config.with_log_file(None);
        assert!(config.with_ansi);
    }

    #[test]
    fn test_default_log_file_name() {
        if let Ok(path) = LogConfig::default_log_file() {
            assert!(path.ends_with("pulsefit/pulsefit.log"));
        }
    }
}
