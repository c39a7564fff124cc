//! # API Client
//!
//! HTTP transport with retry/backoff and the per-collection resource client.

pub mod backoff;
pub mod resource;
pub mod transport;

pub use backoff::ExponentialBackoff;
pub use resource::ResourceClient;
pub use transport::{HttpTransport, Method, Transport};
