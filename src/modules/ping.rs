//! # Ping
//!
//! Health check: lists environments and verifies the envelope kind, which
//! proves the endpoint is reachable and the credentials are accepted.

use super::environment::Environment;
use super::{ModuleContext, ModuleOutput, ModulePayload};
use crate::client::ResourceClient;
use crate::error::{Error, Result};
use crate::reconciler::ResourceKind;
use tracing::debug;

/// # Errors
/// Propagates API errors; an unexpected envelope is an invalid response.
pub async fn invoke(ctx: &ModuleContext<'_>) -> Result<ModuleOutput> {
    let envelope = ResourceClient::new(ctx.transport, Environment::RESOURCE_PATH)
        .list()
        .await?;

    match envelope.kind.as_deref() {
        Some(kind) if kind == Environment::LIST_KIND => {
            debug!("Ping succeeded");
            Ok(ctx.output(false, ModulePayload::Ping("pong".to_string())))
        }
        other => Err(Error::InvalidResponse(format!(
            "ping failure: expected kind '{}', got {}",
            Environment::LIST_KIND,
            other.map_or_else(|| "none".to_string(), |k| format!("'{k}'"))
        ))),
    }
}
