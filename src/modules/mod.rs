//! # Modules
//!
//! Host-facing operations. Each module takes typed parameters, runs against a
//! [`ModuleContext`] and produces a [`ModuleOutput`] record:
//!
//! ```json
//! {"changed": false, "confluent_api": {...}, "environment_info": {...}}
//! ```
//!
//! Failures are reported as a [`ModuleFailure`] record instead.

pub mod environment;
pub mod environment_info;
pub mod ping;

use crate::client::Transport;
use crate::config::ApiDiagnostics;
use crate::types::Resource;
use serde::Serialize;
use std::collections::BTreeMap;

pub use environment::{Environment, EnvironmentParams};
pub use environment_info::EnvironmentInfoParams;

/// Everything a module needs for one invocation
pub struct ModuleContext<'a> {
    pub transport: &'a dyn Transport,
    /// Effective connection settings, echoed back in every result
    pub diagnostics: ApiDiagnostics,
    pub check_mode: bool,
}

impl std::fmt::Debug for ModuleContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleContext")
            .field("diagnostics", &self.diagnostics)
            .field("check_mode", &self.check_mode)
            .finish_non_exhaustive()
    }
}

impl ModuleContext<'_> {
    fn output(&self, changed: bool, payload: ModulePayload) -> ModuleOutput {
        ModuleOutput {
            changed,
            confluent_api: self.diagnostics.clone(),
            payload,
        }
    }
}

/// Kind-specific part of a result record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModulePayload {
    Environment(Option<Resource>),
    EnvironmentInfo(BTreeMap<String, Resource>),
    Ping(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleOutput {
    pub changed: bool,
    pub confluent_api: ApiDiagnostics,
    #[serde(flatten)]
    pub payload: ModulePayload,
}

/// `{failed: true, msg, exception}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleFailure {
    pub failed: bool,
    pub msg: String,
    /// Full error chain
    pub exception: String,
}

impl From<&anyhow::Error> for ModuleFailure {
    fn from(err: &anyhow::Error) -> Self {
        Self {
            failed: true,
            msg: format!("{err:#}"),
            exception: format!("{err:?}"),
        }
    }
}
