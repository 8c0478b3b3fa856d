//! Applier and directory loader backed by the Books contacts API.

use std::collections::HashMap;
use std::future::Future;

use recon_cache::{Namespace, SnapshotStore};
use recon_client::{ApiClient, Method, ReqwestTransport, Transport};
use recon_core::entities::TargetEntity;
use recon_core::enums::EntityKind;
use recon_match::Directory;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::contacts::ContactPayload;
use crate::error::SyncError;

/// Writes contacts to the target system.
pub trait Applier {
    /// Create a contact and return the entity the service assigned.
    fn create(
        &self,
        kind: EntityKind,
        payload: &ContactPayload,
    ) -> impl Future<Output = Result<TargetEntity, SyncError>>;

    /// Overwrite the contact `id` with `payload`.
    fn update(&self, id: &str, payload: &ContactPayload) -> impl Future<Output = Result<(), SyncError>>;
}

/// Supplies the directory a batch resolves against, one per entity kind.
pub trait DirectoryLoader {
    fn load(&mut self, kind: EntityKind) -> impl Future<Output = Result<Directory, SyncError>>;

    /// Called after each successful create so later loads include `entity`.
    fn record_created(&mut self, entity: &TargetEntity) -> impl Future<Output = Result<(), SyncError>> {
        let _ = entity;
        async { Ok(()) }
    }
}

/// [`Applier`] over `POST /contacts` and `PUT /contacts/{id}`.
#[derive(Debug, Clone)]
pub struct BooksApplier<T = ReqwestTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> BooksApplier<T> {
    pub const fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }
}

impl<T: Transport> Applier for BooksApplier<T> {
    async fn create(&self, kind: EntityKind, payload: &ContactPayload) -> Result<TargetEntity, SyncError> {
        let body = serde_json::to_value(payload).map_err(|e| SyncError::UnexpectedResponse(e.to_string()))?;
        let response = self.client.call(Method::POST, "/contacts", Some(&body), &[]).await?;

        let contact = response
            .get("contact")
            .ok_or_else(|| SyncError::UnexpectedResponse("create reply has no 'contact'".into()))?;
        let id = string_field(contact, "contact_id")
            .ok_or_else(|| SyncError::UnexpectedResponse("created contact has no 'contact_id'".into()))?;
        let name = string_field(contact, "contact_name").unwrap_or_else(|| payload.contact_name.clone());

        debug!(contact_id = %id, name = %name, "contact created");
        Ok(TargetEntity::new(id, name, kind))
    }

    async fn update(&self, id: &str, payload: &ContactPayload) -> Result<(), SyncError> {
        let body = serde_json::to_value(payload).map_err(|e| SyncError::UnexpectedResponse(e.to_string()))?;
        let endpoint = format!("/contacts/{}", urlencoding::encode(id));
        self.client.call(Method::PUT, &endpoint, Some(&body), &[]).await?;
        debug!(contact_id = id, "contact updated");
        Ok(())
    }
}

/// [`DirectoryLoader`] that lists every contact and keeps those of the
/// requested kind, optionally through the snapshot cache.
pub struct BooksDirectoryLoader<'a, T = ReqwestTransport> {
    client: &'a ApiClient<T>,
    cache: Option<&'a SnapshotStore>,
    force_refresh: bool,
    loaded: HashMap<EntityKind, Vec<TargetEntity>>,
}

impl<'a, T: Transport> BooksDirectoryLoader<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self {
            client,
            cache: None,
            force_refresh: false,
            loaded: HashMap::new(),
        }
    }

    /// Serve directories from `cache`; `force_refresh` re-lists once per kind.
    #[must_use]
    pub fn with_cache(mut self, cache: &'a SnapshotStore, force_refresh: bool) -> Self {
        self.cache = Some(cache);
        self.force_refresh = force_refresh;
        self
    }

    /// Directory entries of `kind`, as loaded (before any in-run creates).
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] if listing or the cache fails.
    pub async fn entities(&mut self, kind: EntityKind) -> Result<Vec<TargetEntity>, SyncError> {
        let entities = match self.cache {
            Some(cache) => {
                cache
                    .get(Namespace::Directory, kind.as_str(), self.force_refresh, || {
                        fetch_contacts(self.client, kind)
                    })
                    .await?
            }
            None => fetch_contacts(self.client, kind).await?,
        };
        self.loaded.insert(kind, entities.clone());
        Ok(entities)
    }
}

impl<T: Transport> DirectoryLoader for BooksDirectoryLoader<'_, T> {
    async fn load(&mut self, kind: EntityKind) -> Result<Directory, SyncError> {
        let entities = self.entities(kind).await?;
        info!(%kind, count = entities.len(), "directory loaded");
        Ok(Directory::from_entities(entities))
    }

    async fn record_created(&mut self, entity: &TargetEntity) -> Result<(), SyncError> {
        let entities = self.loaded.entry(entity.kind).or_default();
        entities.push(entity.clone());
        if let Some(cache) = self.cache {
            cache.put(Namespace::Directory, entity.kind.as_str(), &*entities).await?;
        }
        Ok(())
    }
}

async fn fetch_contacts<T: Transport>(client: &ApiClient<T>, kind: EntityKind) -> Result<Vec<TargetEntity>, SyncError> {
    let contacts = client.list_all("/contacts", "contacts", &[]).await?;
    Ok(contacts.iter().filter_map(|c| contact_entity(c, kind)).collect())
}

/// Directory entry for one listed contact, when it is of `kind`.
fn contact_entity(contact: &Value, kind: EntityKind) -> Option<TargetEntity> {
    let contact_type = contact.get("contact_type").and_then(Value::as_str)?;
    if !contact_type.eq_ignore_ascii_case(kind.as_str()) {
        return None;
    }
    match (string_field(contact, "contact_id"), string_field(contact, "contact_name")) {
        (Some(id), Some(name)) => Some(TargetEntity::new(id, name, kind)),
        _ => {
            warn!(%kind, "listed contact without id or name, skipped");
            None
        }
    }
}

/// Non-empty string at `key`; numeric ids are rendered as text.
fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn listed_contacts_are_filtered_by_kind() {
        let customer = json!({"contact_id": "46001", "contact_name": "Acme", "contact_type": "customer"});
        let vendor = json!({"contact_id": "46002", "contact_name": "Supplier", "contact_type": "vendor"});

        assert_eq!(
            contact_entity(&customer, EntityKind::Customer),
            Some(TargetEntity::new("46001", "Acme", EntityKind::Customer))
        );
        assert_eq!(contact_entity(&vendor, EntityKind::Customer), None);
        assert_eq!(contact_entity(&json!({"contact_name": "x"}), EntityKind::Customer), None);
    }

    #[test]
    fn contacts_without_identity_are_skipped() {
        let nameless = json!({"contact_id": "1", "contact_name": "  ", "contact_type": "vendor"});
        assert_eq!(contact_entity(&nameless, EntityKind::Vendor), None);
    }

    #[test]
    fn numeric_ids_become_text() {
        let contact = json!({"contact_id": 460_000_000_012_u64});
        assert_eq!(string_field(&contact, "contact_id").as_deref(), Some("460000000012"));
    }
}
