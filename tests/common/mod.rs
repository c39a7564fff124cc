//! Common test utilities for integration and Pact tests
//!
//! Provides rustls crypto provider setup and a transport pointed at a mock
//! server with millisecond backoff.

#![allow(dead_code, reason = "Each test binary uses a different subset")]

use confluent_cloud::client::HttpTransport;
use confluent_cloud::config::{ApiConfig, ApiCredentials};
use confluent_cloud::modules::ModuleContext;
use serde_json::{json, Value};
use std::sync::Once;
use std::time::Duration;

pub const API_KEY: &str = "test-key";
pub const API_SECRET: &str = "test-secret";
/// `Basic base64("test-key:test-secret")`
pub const BASIC_AUTH_HEADER: &str = "Basic dGVzdC1rZXk6dGVzdC1zZWNyZXQ=";

static RUSTLS_INIT: Once = Once::new();

/// Initialize rustls crypto provider for tests
///
/// This must be called before any async operations that use rustls.
/// Uses a `Once` to ensure it's only called once across all tests.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        // We use ring as the crypto provider (matches the binary)
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Config for a mock server: fast backoff, short timeout
pub fn test_config(endpoint: &str, retries: u32) -> ApiConfig {
    ApiConfig::default()
        .with_endpoint(endpoint)
        .with_timeout(Duration::from_secs(2))
        .with_retries(retries)
        .with_retry_base_delay(Duration::from_millis(1))
        .with_retry_max_delay(Duration::from_millis(20))
}

pub fn transport(config: ApiConfig) -> HttpTransport {
    init_rustls();
    let credentials = ApiCredentials::new(API_KEY, API_SECRET).expect("valid test credentials");
    HttpTransport::new(config, credentials).expect("valid test transport")
}

pub fn context(transport: &HttpTransport, check_mode: bool) -> ModuleContext<'_> {
    ModuleContext {
        transport,
        diagnostics: transport.config().diagnostics(),
        check_mode,
    }
}

/// `EnvironmentList` envelope around `environments`
pub fn environment_list(environments: Value) -> Value {
    json!({
        "api_version": "org/v2",
        "kind": "EnvironmentList",
        "metadata": {"first": "", "next": ""},
        "data": environments
    })
}

pub fn environment(id: &str, display_name: &str) -> Value {
    json!({
        "api_version": "org/v2",
        "kind": "Environment",
        "id": id,
        "display_name": display_name,
        "metadata": {
            "created_at": "2022-06-01T12:00:00Z",
            "updated_at": "2022-06-01T12:00:00Z"
        }
    })
}
