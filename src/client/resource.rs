//! # Resource Client
//!
//! CRUD operations on one REST collection, e.g. `/org/v2/environments`.
//!
//! - `query` lists the collection (empty is fine)
//! - `create` POSTs new attributes
//! - `update` PATCHes only when a requested field differs
//! - `absent` DELETEs, treating 404 as "already gone"

use crate::client::transport::{Method, Transport};
use crate::error::{Error, Result};
use crate::types::{ListEnvelope, ReconcileResult, Resource};
use reqwest::Url;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

pub struct ResourceClient<'a> {
    transport: &'a dyn Transport,
    resource_path: String,
    resource_key_id: Option<String>,
}

impl std::fmt::Debug for ResourceClient<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource_path", &self.resource_path)
            .field("resource_key_id", &self.resource_key_id)
            .finish_non_exhaustive()
    }
}

impl<'a> ResourceClient<'a> {
    #[must_use]
    pub fn new(transport: &'a dyn Transport, resource_path: impl Into<String>) -> Self {
        Self {
            transport,
            resource_path: resource_path.into(),
            resource_key_id: None,
        }
    }

    /// Address a single item of the collection
    #[must_use]
    pub fn with_key_id(mut self, resource_key_id: impl Into<String>) -> Self {
        self.resource_key_id = Some(resource_key_id.into());
        self
    }

    /// Collection path with `key` appended as one percent-encoded segment
    fn item_path(&self, key: &str) -> Result<String> {
        let invalid = || Error::Configuration(format!("cannot build an item path for {key:?}"));
        if matches!(key, "" | "." | "..") {
            return Err(invalid());
        }
        let mut segment = Url::parse("http://localhost/").map_err(|_| invalid())?;
        segment
            .path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .push(key);
        Ok(format!(
            "{}{}",
            self.resource_path.trim_end_matches('/'),
            segment.path()
        ))
    }

    /// The full list envelope, including its `kind`
    ///
    /// # Errors
    /// Propagates classified transport failures and malformed envelopes.
    pub async fn list(&self) -> Result<ListEnvelope> {
        let body = self
            .transport
            .request(Method::Get, &self.resource_path, None)
            .await?;
        ListEnvelope::try_from(body)
    }

    /// The `data` array of the collection
    ///
    /// # Errors
    /// Propagates classified transport failures and malformed envelopes.
    pub async fn query(&self) -> Result<Vec<Resource>> {
        let envelope = self.list().await?;
        debug!(
            path = %self.resource_path,
            count = envelope.data.len(),
            "Queried resources"
        );
        Ok(envelope.data)
    }

    /// A success body that does not describe a resource still counts as a
    /// change; the resource is then unknown.
    ///
    /// # Errors
    /// Propagates classified transport failures.
    pub async fn create(&self, attributes: &Map<String, Value>) -> Result<ReconcileResult> {
        let body = Value::Object(attributes.clone());
        let created = self
            .transport
            .request(Method::Post, &self.resource_path, Some(&body))
            .await?;
        match Resource::try_from(created) {
            Ok(resource) => {
                info!(path = %self.resource_path, id = resource.id(), "Created resource");
                Ok(ReconcileResult::changed(Some(resource)))
            }
            Err(e) => {
                warn!(path = %self.resource_path, error = %e, "Created resource, but the response does not describe it");
                Ok(ReconcileResult::changed(None))
            }
        }
    }

    /// Converge `existing` to `attributes`
    ///
    /// No request is made when every requested field already matches.
    ///
    /// # Errors
    /// Propagates classified transport failures.
    pub async fn update(
        &self,
        existing: &Resource,
        attributes: &Map<String, Value>,
    ) -> Result<ReconcileResult> {
        if existing.matches(attributes) {
            debug!(id = existing.id(), "Resource already up to date, skipping update");
            return Ok(ReconcileResult::unchanged(Some(existing.clone())));
        }

        let key = self.resource_key_id.as_deref().unwrap_or(existing.id());
        let path = self.item_path(key)?;
        let body = Value::Object(attributes.clone());
        let updated = self
            .transport
            .request(Method::Patch, &path, Some(&body))
            .await?;

        // Some endpoints answer 204 or a body without an id; fall back to what was requested
        let resource = if updated.is_null() {
            existing.merged(attributes)
        } else {
            Resource::try_from(updated).unwrap_or_else(|e| {
                warn!(%path, error = %e, "Update response does not describe the resource");
                existing.merged(attributes)
            })
        };
        info!(%path, "Updated resource");
        Ok(ReconcileResult::changed(Some(resource)))
    }

    /// Delete the keyed item
    ///
    /// A 404 on the first attempt means the item was already gone. A 404 after
    /// retries counts as a change, since an earlier attempt may have deleted it.
    ///
    /// # Errors
    /// Returns a configuration error without a key id; propagates classified
    /// transport failures other than 404.
    pub async fn absent(&self) -> Result<ReconcileResult> {
        let key = self.resource_key_id.as_deref().ok_or_else(|| {
            Error::Configuration(format!(
                "a resource id is required to delete from {}",
                self.resource_path
            ))
        })?;
        let path = self.item_path(key)?;

        match self.transport.request(Method::Delete, &path, None).await {
            Ok(_) => {
                info!(%path, "Deleted resource");
                Ok(ReconcileResult::changed(None))
            }
            // A timed-out earlier attempt may have performed the delete
            Err(err) if err.status == Some(404) && err.attempts > 1 => {
                info!(%path, attempts = err.attempts, "Resource gone after a retried delete");
                Ok(ReconcileResult::changed(None))
            }
            Err(err) if err.status == Some(404) => {
                debug!(%path, "Resource already absent");
                Ok(ReconcileResult::unchanged(None))
            }
            Err(err) => Err(Error::from_http(err)),
        }
    }
}
