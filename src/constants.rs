//! # Constants
//!
//! Shared constants used throughout the crate.
//!
//! Connection defaults match the documented defaults of the Confluent Cloud
//! collection and can be overridden via environment variables or CLI flags.

/// Default Confluent Cloud management API endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://api.confluent.cloud";

/// Default per-request timeout (seconds)
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 60;

/// Default number of retries after the first attempt
pub const DEFAULT_API_RETRIES: u32 = 5;

/// Default cap on a single backoff delay (seconds)
pub const DEFAULT_API_RETRY_MAX_DELAY_SECS: u64 = 12;

/// First backoff step (milliseconds); doubles on every retry
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;

/// Environments collection path
pub const ENVIRONMENTS_PATH: &str = "/org/v2/environments";

/// `kind` reported by the environments list envelope
pub const ENVIRONMENT_LIST_KIND: &str = "EnvironmentList";

/// Environment variable names
pub const ENV_API_KEY: &str = "CONFLUENT_CLOUD_API_KEY";
pub const ENV_API_SECRET: &str = "CONFLUENT_CLOUD_API_SECRET";
pub const ENV_API_ENDPOINT: &str = "CONFLUENT_API_ENDPOINT";
pub const ENV_API_TIMEOUT: &str = "CONFLUENT_API_TIMEOUT";
pub const ENV_API_RETRIES: &str = "CONFLUENT_API_RETRIES";
pub const ENV_API_RETRY_MAX_DELAY: &str = "CONFLUENT_API_RETRY_MAX_DELAY";

/// User agent sent with every API request
pub const USER_AGENT: &str = concat!(
    "confluent-cloud-rs/",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    ")"
);
