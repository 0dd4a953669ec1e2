//! Structured logging setup
//!
//! Logging goes through `tracing`; this module installs the subscriber once
//! per process. `RUST_LOG` takes precedence over everything configured here.
//!
//! ```no_run
//! use pipewright::util::logging::{self, LoggingConfig};
//! use tracing::Level;
//!
//! logging::init_logging(LoggingConfig::with_level(Level::DEBUG));
//! tracing::info!(repo = "psf/requests", "Analyzing repository");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for this crate and the HTTP tracing layer
    pub level: Level,

    /// One JSON object per line instead of human-readable output
    pub use_json: bool,

    pub include_target: bool,

    /// Include file and line number
    pub include_location: bool,

    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON output with full metadata, for log collectors
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
            include_thread_ids: true,
        }
    }

    /// Directives used when `RUST_LOG` is unset
    pub fn default_directives(&self) -> String {
        let level = self.level.as_str().to_lowercase();
        format!(
            "pipewright={level},tower_http={level},h2=warn,hyper=warn,reqwest=warn",
            level = level
        )
    }
}

/// Parses a log level, falling back to INFO on unknown input
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.default_directives()));

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

/// Reads `PIPEWRIGHT_LOG_JSON` (true/false)
pub fn json_from_env() -> bool {
    env::var("PIPEWRIGHT_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("Warn"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
        assert_eq!(parse_level("verbose"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_default_directives() {
        let config = LoggingConfig::with_level(Level::DEBUG);
        assert_eq!(
            config.default_directives(),
            "pipewright=debug,tower_http=debug,h2=warn,hyper=warn,reqwest=warn"
        );
    }

    #[test]
    fn test_production_config() {
        let config = LoggingConfig::production();
        assert!(config.use_json);
        assert!(config.include_location);
    }

    #[test]
    #[serial]
    fn test_json_from_env() {
        env::set_var("PIPEWRIGHT_LOG_JSON", "true");
        assert!(json_from_env());
        env::set_var("PIPEWRIGHT_LOG_JSON", "yes");
        assert!(!json_from_env());
        env::remove_var("PIPEWRIGHT_LOG_JSON");
        assert!(!json_from_env());
    }
}
