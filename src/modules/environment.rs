//! # Environment
//!
//! Create, rename or delete one Confluent Cloud environment.
//!
//! Lookup is by `id` first, then by `display_name`. Renaming requires the id.

use super::{ModuleContext, ModuleOutput, ModulePayload};
use crate::constants::{ENVIRONMENTS_PATH, ENVIRONMENT_LIST_KIND};
use crate::error::Result;
use crate::reconciler::{Reconciler, ResourceKind};
use crate::types::{DesiredState, State};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy)]
pub struct Environment;

impl ResourceKind for Environment {
    const KIND: &'static str = "environment";
    const RESOURCE_PATH: &'static str = ENVIRONMENTS_PATH;
    const NAME_FIELD: &'static str = "display_name";
    const LIST_KIND: &'static str = ENVIRONMENT_LIST_KIND;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EnvironmentParams {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub state: State,
}

impl EnvironmentParams {
    #[must_use]
    pub fn desired_state(&self) -> DesiredState {
        let mut attributes = Map::new();
        if let Some(name) = &self.name {
            attributes.insert(
                Environment::NAME_FIELD.to_string(),
                Value::String(name.clone()),
            );
        }
        DesiredState {
            id: self.id.clone(),
            name: self.name.clone(),
            attributes,
            state: self.state,
        }
    }
}

/// # Errors
/// Propagates reconciler errors unchanged.
pub async fn invoke(ctx: &ModuleContext<'_>, params: &EnvironmentParams) -> Result<ModuleOutput> {
    let result = Reconciler::<Environment>::new(ctx.transport)
        .with_check_mode(ctx.check_mode)
        .reconcile(&params.desired_state())
        .await?;

    Ok(ctx.output(
        result.changed,
        ModulePayload::Environment(result.resource),
    ))
}
