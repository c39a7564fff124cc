//! # Observability
//!
//! - `logging`: tracing subscriber setup (stderr, text or JSON)
//! - `metrics`: Prometheus counters and histograms for API calls and reconciliations

pub mod logging;
pub mod metrics;

pub use logging::init_tracing;
