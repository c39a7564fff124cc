//! # Confluent Cloud
//!
//! Desired-state management of Confluent Cloud resources over the management
//! REST API.
//!
//! ## Layers
//!
//! - [`client`]: HTTP transport with retry/backoff and a per-collection resource client
//! - [`reconciler`]: lookup, planning and convergence of one resource kind
//! - [`modules`]: host-facing operations (`environment`, `environment_info`, `ping`)
//!   producing JSON-serializable result records
//!
//! Everything runs sequentially: one query, then at most one mutating call.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod modules;
pub mod observability;
pub mod reconciler;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::{Error, ErrorKind, HttpError, HttpErrorKind, Result};
