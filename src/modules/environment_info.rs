//! # Environment Info
//!
//! Read-only listing of environments, optionally narrowed by ids or names.

use super::environment::Environment;
use super::{ModuleContext, ModuleOutput, ModulePayload};
use crate::error::Result;
use crate::reconciler::{InfoQuery, Reconciler};
use serde::Deserialize;

/// `ids` and `names` are mutually exclusive
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EnvironmentInfoParams {
    pub ids: Option<Vec<String>>,
    pub names: Option<Vec<String>>,
}

impl From<&EnvironmentInfoParams> for InfoQuery {
    fn from(params: &EnvironmentInfoParams) -> Self {
        InfoQuery {
            ids: params.ids.clone(),
            names: params.names.clone(),
        }
    }
}

/// # Errors
/// Returns a configuration error, before any request, when both `ids` and
/// `names` are given; otherwise propagates API errors.
pub async fn invoke(
    ctx: &ModuleContext<'_>,
    params: &EnvironmentInfoParams,
) -> Result<ModuleOutput> {
    let environments = Reconciler::<Environment>::new(ctx.transport)
        .info(&InfoQuery::from(params))
        .await?;

    Ok(ctx.output(false, ModulePayload::EnvironmentInfo(environments)))
}
