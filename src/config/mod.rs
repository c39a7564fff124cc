//! # Configuration
//!
//! Settings loaded once at the boundary: API connection settings,
//! credentials and logging.

mod api;
mod logging;

pub use api::{ApiConfig, ApiCredentials, ApiDiagnostics};
pub use logging::{LogFormat, LoggingConfig};

/// Read environment variable or return default value
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read environment variable as string or return default
fn env_var_or_default_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
