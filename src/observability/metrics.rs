//! # Metrics
//!
//! Prometheus metrics for API traffic and reconciliation outcomes.
//!
//! ## Metrics Exposed
//!
//! - `confluent_api_requests_total` - HTTP attempts by method and outcome
//! - `confluent_api_retries_total` - Retries scheduled by method
//! - `confluent_api_request_duration_seconds` - Duration of single HTTP attempts
//! - `confluent_reconcile_operations_total` - Reconciliations by resource kind and operation

use anyhow::Result;
use prometheus::{Encoder, HistogramVec, IntCounterVec, Registry, TextEncoder};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static API_REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "confluent_api_requests_total",
            "Total number of Confluent Cloud API request attempts",
        ),
        &["method", "outcome"],
    )
    .expect("Failed to create API_REQUESTS_TOTAL metric - this should never happen")
});

static API_RETRIES_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "confluent_api_retries_total",
            "Total number of retried Confluent Cloud API requests",
        ),
        &["method"],
    )
    .expect("Failed to create API_RETRIES_TOTAL metric - this should never happen")
});

static API_REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "confluent_api_request_duration_seconds",
            "Duration of Confluent Cloud API request attempts in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["method"],
    )
    .expect("Failed to create API_REQUEST_DURATION metric - this should never happen")
});

static RECONCILE_OPERATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "confluent_reconcile_operations_total",
            "Total number of reconciliations by resource kind and operation",
        ),
        &["kind", "operation"],
    )
    .expect("Failed to create RECONCILE_OPERATIONS_TOTAL metric - this should never happen")
});

#[allow(
    clippy::missing_errors_doc,
    reason = "Only fails when called twice in one process"
)]
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(API_REQUESTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(API_RETRIES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(API_REQUEST_DURATION.clone()))?;
    REGISTRY.register(Box::new(RECONCILE_OPERATIONS_TOTAL.clone()))?;

    Ok(())
}

pub fn record_api_request(method: &str, outcome: &str, duration: f64) {
    API_REQUESTS_TOTAL
        .with_label_values(&[method, outcome])
        .inc();
    API_REQUEST_DURATION
        .with_label_values(&[method])
        .observe(duration);
}

pub fn increment_api_retries(method: &str) {
    API_RETRIES_TOTAL.with_label_values(&[method]).inc();
}

pub fn record_reconcile_operation(kind: &str, operation: &str) {
    RECONCILE_OPERATIONS_TOTAL
        .with_label_values(&[kind, operation])
        .inc();
}

/// Text exposition of everything registered in [`REGISTRY`]
///
/// # Errors
/// Fails when the encoder rejects a metric family.
pub fn gather_text() -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
