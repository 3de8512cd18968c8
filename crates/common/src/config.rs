//! Application configuration.
//!
//! Nothing here is written back to disk. Options for a single capture or
//! playback request come from the command line; this only carries the
//! process-wide settings that the environment may override.

use serde::{Deserialize, Serialize};

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "CAMSTREAM_LOG";

/// Environment variable enabling JSON log output (`1` or `true`).
pub const LOG_JSON_ENV: &str = "CAMSTREAM_LOG_JSON";

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "camstream_launcher=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Build the configuration from defaults and the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup(LOG_ENV).filter(|v| !v.trim().is_empty()) {
            config.logging.level = level.trim().to_string();
        }

        if let Some(json) = lookup(LOG_JSON_ENV) {
            config.logging.json = matches!(json.trim().to_ascii_lowercase().as_str(), "1" | "true");
        }

        config
    }

    /// Force debug-level logging (the CLI's `--verbose`).
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.logging.level = "debug".to_string();
        }
        self
    }
}
