//! # API Configuration
//!
//! Connection settings and credentials for the Confluent Cloud management API.

use crate::constants::{
    DEFAULT_API_ENDPOINT, DEFAULT_API_RETRIES, DEFAULT_API_RETRY_MAX_DELAY_SECS,
    DEFAULT_API_TIMEOUT_SECS, DEFAULT_RETRY_BASE_DELAY_MS, ENV_API_ENDPOINT, ENV_API_RETRIES,
    ENV_API_RETRY_MAX_DELAY, ENV_API_TIMEOUT,
};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{env_var_or_default, env_var_or_default_str};

/// API key pair used for HTTP basic authentication
///
/// Both halves are wiped from memory when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ApiCredentials {
    api_key: String,
    api_secret: String,
}

impl ApiCredentials {
    /// # Errors
    /// Returns a configuration error if either half is empty.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        let credentials = Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        };
        if credentials.api_key.trim().is_empty() {
            return Err(Error::Configuration("api_key must not be empty".to_string()));
        }
        if credentials.api_secret.trim().is_empty() {
            return Err(Error::Configuration(
                "api_secret must not be empty".to_string(),
            ));
        }
        Ok(credentials)
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Per-invocation connection settings
///
/// Immutable once handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://api.confluent.cloud`
    pub endpoint: String,
    /// Upper bound for a single request
    pub timeout: Duration,
    /// Retries after the first attempt for transient failures
    pub retries: u32,
    /// Cap applied to every backoff delay
    pub retry_max_delay: Duration,
    /// First backoff delay; doubles on every retry
    pub retry_base_delay: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            retries: DEFAULT_API_RETRIES,
            retry_max_delay: Duration::from_secs(DEFAULT_API_RETRY_MAX_DELAY_SECS),
            retry_base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables with defaults
    ///
    /// Unset or unparsable variables fall back to the documented defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            endpoint: env_var_or_default_str(ENV_API_ENDPOINT, DEFAULT_API_ENDPOINT),
            timeout: Duration::from_secs(env_var_or_default(
                ENV_API_TIMEOUT,
                DEFAULT_API_TIMEOUT_SECS,
            )),
            retries: env_var_or_default(ENV_API_RETRIES, DEFAULT_API_RETRIES),
            retry_max_delay: Duration::from_secs(env_var_or_default(
                ENV_API_RETRY_MAX_DELAY,
                DEFAULT_API_RETRY_MAX_DELAY_SECS,
            )),
            retry_base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    #[must_use]
    pub fn with_retry_max_delay(mut self, delay: Duration) -> Self {
        self.retry_max_delay = delay;
        self
    }

    #[must_use]
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Check the settings once, at the boundary
    ///
    /// # Errors
    /// Returns a configuration error for a non-http(s) endpoint or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.endpoint).map_err(|e| {
            Error::Configuration(format!("invalid api_endpoint '{}': {e}", self.endpoint))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "api_endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::Configuration(
                "api_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Absolute URL for a path relative to the endpoint
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Effective settings as reported back to the caller
    #[must_use]
    pub fn diagnostics(&self) -> ApiDiagnostics {
        ApiDiagnostics {
            api_timeout: self.timeout.as_secs(),
            api_retries: self.retries,
            api_retry_max_delay: self.retry_max_delay.as_secs(),
            api_endpoint: self.endpoint.clone(),
        }
    }
}

/// `confluent_api` block of every module result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiDiagnostics {
    pub api_timeout: u64,
    pub api_retries: u32,
    pub api_retry_max_delay: u64,
    pub api_endpoint: String,
}
