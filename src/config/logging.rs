//! # Logging Configuration
//!
//! Log level and format, loaded from environment variables.

use super::env_var_or_default_str;

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default directive when `RUST_LOG` is not set (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    /// Reads `LOG_LEVEL` and `LOG_FORMAT` (`text` or `json`)
    #[must_use]
    pub fn from_env() -> Self {
        let log_format = match env_var_or_default_str("LOG_FORMAT", "text")
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Self {
            log_level: env_var_or_default_str("LOG_LEVEL", "INFO"),
            log_format,
        }
    }

    /// Filter directive scoped to this crate, e.g. `confluent_cloud=info`
    #[must_use]
    pub fn default_directive(&self) -> String {
        format!("confluent_cloud={}", self.log_level.to_lowercase())
    }
}
