//! # Lookup
//!
//! Pure matching of desired identifiers against a fetched listing.
//!
//! Order matters: the backend does not guarantee unique names, so the first
//! match in listing order wins, and an id match always beats a name match.

use crate::error::{Error, Result};
use crate::types::{Resource, State};
use std::collections::BTreeMap;

/// Find the resource a desired state refers to
///
/// 1. First resource whose `id` equals `id`
/// 2. Otherwise, first resource whose `name_field` equals `name`
/// 3. Otherwise none
#[must_use]
pub fn lookup<'r>(
    resources: &'r [Resource],
    id: Option<&str>,
    name: Option<&str>,
    name_field: &str,
) -> Option<&'r Resource> {
    let by_id = id.and_then(|id| resources.iter().find(|r| r.id() == id));
    by_id.or_else(|| {
        name.and_then(|name| {
            resources
                .iter()
                .find(|r| r.str_field(name_field) == Some(name))
        })
    })
}

/// Action a reconciler takes for one desired state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Plan<'r> {
    Create,
    Update(&'r Resource),
    Delete(&'r Resource),
    NoOp,
}

impl Plan<'_> {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Create => "create",
            Plan::Update(_) => "update",
            Plan::Delete(_) => "delete",
            Plan::NoOp => "no_change",
        }
    }
}

/// Decide what to do from the lookup result and the desired state
#[must_use]
pub fn plan(existing: Option<&Resource>, state: State) -> Plan<'_> {
    match (existing, state) {
        (None, State::Present) => Plan::Create,
        (None, State::Absent) => Plan::NoOp,
        (Some(resource), State::Present) => Plan::Update(resource),
        (Some(resource), State::Absent) => Plan::Delete(resource),
    }
}

/// Filter for bulk info queries
///
/// `ids` and `names` are mutually exclusive; an empty list counts as unset
/// for filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoQuery {
    pub ids: Option<Vec<String>>,
    pub names: Option<Vec<String>>,
}

impl InfoQuery {
    /// # Errors
    /// Returns a configuration error when both `ids` and `names` are supplied.
    pub fn validate(&self) -> Result<()> {
        if self.ids.is_some() && self.names.is_some() {
            return Err(Error::Configuration(
                "parameters are mutually exclusive: ids|names".to_string(),
            ));
        }
        Ok(())
    }

    /// Id-keyed map of every resource the query selects
    #[must_use]
    pub fn select(&self, resources: &[Resource], name_field: &str) -> BTreeMap<String, Resource> {
        let ids = self.ids.as_deref().filter(|ids| !ids.is_empty());
        let names = self.names.as_deref().filter(|names| !names.is_empty());

        resources
            .iter()
            .filter(|r| match (ids, names) {
                (Some(ids), _) => ids.iter().any(|id| id == r.id()),
                (None, Some(names)) => r
                    .str_field(name_field)
                    .is_some_and(|n| names.iter().any(|name| name == n)),
                (None, None) => true,
            })
            .map(|r| (r.id().to_string(), r.clone()))
            .collect()
    }
}
