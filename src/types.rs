//! # Types
//!
//! Resource representation and reconciliation inputs/outputs shared by the
//! resource client, the reconcilers and the module layer.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A remote resource as returned by the API
///
/// Always carries a server-assigned `id`; the remaining fields are kind-specific
/// (e.g. `display_name` for environments).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Resource(Map<String, Value>);

impl Resource {
    #[must_use]
    pub fn id(&self) -> &str {
        self.str_field("id").unwrap_or_default()
    }

    #[must_use]
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Whether every requested attribute already has the requested value
    #[must_use]
    pub fn matches(&self, attributes: &Map<String, Value>) -> bool {
        attributes
            .iter()
            .all(|(field, wanted)| self.0.get(field) == Some(wanted))
    }

    /// Copy of this resource with `attributes` applied on top
    #[must_use]
    pub fn merged(&self, attributes: &Map<String, Value>) -> Self {
        let mut fields = self.0.clone();
        for (field, value) in attributes {
            fields.insert(field.clone(), value.clone());
        }
        Self(fields)
    }
}

impl TryFrom<Value> for Resource {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => match fields.get("id") {
                Some(Value::String(id)) if !id.is_empty() => Ok(Self(fields)),
                _ => Err(Error::InvalidResponse(
                    "resource without a string 'id' field".to_string(),
                )),
            },
            other => Err(Error::InvalidResponse(format!(
                "expected a JSON object for a resource, got {other}"
            ))),
        }
    }
}

/// `{kind, data: [...]}` wrapper returned by list endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct ListEnvelope {
    pub kind: Option<String>,
    pub data: Vec<Resource>,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    data: Vec<Value>,
}

impl TryFrom<Value> for ListEnvelope {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        // A bodiless answer is an empty listing
        if value.is_null() {
            return Ok(Self {
                kind: None,
                data: Vec::new(),
            });
        }
        let raw: RawEnvelope = serde_json::from_value(value)
            .map_err(|e| Error::InvalidResponse(format!("malformed list envelope: {e}")))?;
        let data = raw
            .data
            .into_iter()
            .map(Resource::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            kind: raw.kind,
            data,
        })
    }
}

/// Desired presence of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    #[default]
    Present,
    Absent,
}

impl State {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Present => "present",
            State::Absent => "absent",
        }
    }
}

/// What the caller wants the remote resource to look like
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesiredState {
    /// Backend `id`; takes priority over `name` when looking up
    pub id: Option<String>,
    /// Value of the kind's name field
    pub name: Option<String>,
    /// Fields to create with or converge to
    pub attributes: Map<String, Value>,
    pub state: State,
}

/// Normalized outcome of a reconciliation step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileResult {
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,
}

impl ReconcileResult {
    #[must_use]
    pub fn changed(resource: Option<Resource>) -> Self {
        Self {
            changed: true,
            resource,
        }
    }

    #[must_use]
    pub fn unchanged(resource: Option<Resource>) -> Self {
        Self {
            changed: false,
            resource,
        }
    }
}
