//! # Reconciler
//!
//! Converges one remote resource to a caller-supplied desired state.
//!
//! ## Reconciliation Flow
//!
//! 1. Query the collection (one GET, fresh on every call)
//! 2. Look up the existing resource: id first, then name
//! 3. Plan:
//!    - **missing + present**: create
//!    - **missing + absent**: no-op
//!    - **found + present**: update, skipped when nothing differs
//!    - **found + absent**: delete, 404 counts as already gone
//! 4. Issue at most one mutating call, unless running in check mode

mod lookup;

pub use lookup::{lookup, plan, InfoQuery, Plan};

use crate::client::{ResourceClient, Transport};
use crate::error::{Error, Result};
use crate::observability::metrics;
use crate::types::{DesiredState, ReconcileResult, Resource};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use tracing::{debug, info, info_span, Instrument};

/// Static description of a reconcilable resource kind
pub trait ResourceKind {
    /// Short name used in logs, metrics and messages, e.g. `environment`
    const KIND: &'static str;
    /// Collection path, e.g. `/org/v2/environments`
    const RESOURCE_PATH: &'static str;
    /// Field matched by name lookups
    const NAME_FIELD: &'static str;
    /// `kind` reported by the list envelope
    const LIST_KIND: &'static str;
}

pub struct Reconciler<'a, K> {
    transport: &'a dyn Transport,
    check_mode: bool,
    _kind: PhantomData<K>,
}

impl<K> std::fmt::Debug for Reconciler<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("check_mode", &self.check_mode)
            .finish_non_exhaustive()
    }
}

impl<'a, K: ResourceKind> Reconciler<'a, K> {
    #[must_use]
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self {
            transport,
            check_mode: false,
            _kind: PhantomData,
        }
    }

    /// Report changes without issuing mutating calls
    #[must_use]
    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    fn client(&self) -> ResourceClient<'a> {
        ResourceClient::new(self.transport, K::RESOURCE_PATH)
    }

    /// Converge the remote resource to `desired`
    ///
    /// # Errors
    /// Returns a configuration error when a create is needed but no name was
    /// given; otherwise propagates resource client errors.
    pub async fn reconcile(&self, desired: &DesiredState) -> Result<ReconcileResult> {
        let span = info_span!(
            "confluent.reconcile",
            resource.kind = K::KIND,
            desired.state = desired.state.as_str(),
            check_mode = self.check_mode
        );

        async move {
            let resources = self.client().query().await?;
            let existing = lookup(
                &resources,
                desired.id.as_deref(),
                desired.name.as_deref(),
                K::NAME_FIELD,
            );
            let plan = plan(existing, desired.state);
            debug!(plan = plan.as_str(), "Planned reconciliation");

            let result = self.apply(plan, desired).await?;
            metrics::record_reconcile_operation(
                K::KIND,
                if result.changed { plan.as_str() } else { "no_change" },
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }

    async fn apply(&self, plan: Plan<'_>, desired: &DesiredState) -> Result<ReconcileResult> {
        match plan {
            Plan::NoOp => {
                debug!("{} already absent", K::KIND);
                Ok(ReconcileResult::unchanged(None))
            }
            Plan::Create => {
                if desired.name.is_none() {
                    return Err(Error::Configuration(format!(
                        "a name is required to create a new {}",
                        K::KIND
                    )));
                }
                if self.check_mode {
                    info!("Check mode: would create {}", K::KIND);
                    return Ok(ReconcileResult::changed(None));
                }
                self.client().create(&desired.attributes).await
            }
            Plan::Update(existing) => {
                if self.check_mode {
                    if existing.matches(&desired.attributes) {
                        return Ok(ReconcileResult::unchanged(Some(existing.clone())));
                    }
                    info!(id = existing.id(), "Check mode: would update {}", K::KIND);
                    return Ok(ReconcileResult::changed(Some(
                        existing.merged(&desired.attributes),
                    )));
                }
                self.client()
                    .with_key_id(existing.id())
                    .update(existing, &desired.attributes)
                    .await
            }
            Plan::Delete(existing) => {
                if self.check_mode {
                    info!(id = existing.id(), "Check mode: would delete {}", K::KIND);
                    return Ok(ReconcileResult::changed(None));
                }
                self.client().with_key_id(existing.id()).absent().await
            }
        }
    }

    /// Id-keyed view of the collection, optionally filtered by ids or names
    ///
    /// # Errors
    /// Returns a configuration error, before any request, when both `ids` and
    /// `names` are given; otherwise propagates resource client errors.
    pub async fn info(&self, query: &InfoQuery) -> Result<BTreeMap<String, Resource>> {
        query.validate()?;
        let resources = self.client().query().await?;
        let selected = query.select(&resources, K::NAME_FIELD);
        debug!(
            resource.kind = K::KIND,
            total = resources.len(),
            selected = selected.len(),
            "Selected resources"
        );
        Ok(selected)
    }
}
