//! The link store: a JSON document of redirect entries on disk.

use crate::assets::AssetStore;
use crate::document::{LinkDocument, NamespaceMap};
use async_trait::async_trait;
use serde_json::Value;
use splash_core::error::Result;
use splash_core::{LinkEntry, LinkRepository, StoreError, Username};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// File-backed implementation of [`LinkRepository`].
///
/// Every operation reloads the document, mutates an in-memory copy and
/// writes the whole file back. The mutex serializes writers within
/// this process so two mutations never interleave their read and write
/// halves; there is deliberately no cross-process locking.
#[derive(Debug)]
pub struct JsonLinkStore {
    path: PathBuf,
    assets: Arc<AssetStore>,
    write_lock: Mutex<()>,
}

impl JsonLinkStore {
    pub fn new(path: impl Into<PathBuf>, assets: Arc<AssetStore>) -> Self {
        Self {
            path: path.into(),
            assets,
            write_lock: Mutex::new(()),
        }
    }

    /// Reads and classifies the backing document. A missing or
    /// unparseable file is an empty document, never an error.
    async fn load(&self) -> LinkDocument {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(_) => return LinkDocument::empty(),
        };
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => LinkDocument::from_json(value),
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "link document unparseable, treating as empty");
                LinkDocument::empty()
            }
        }
    }

    /// Writes the whole document back in one call.
    async fn save(&self, document: &LinkDocument) -> Result<()> {
        let value = document
            .to_json()
            .map_err(|e| StoreError::Operation(e.to_string()))?;
        let bytes = serde_json::to_vec_pretty(&value)
            .map_err(|e| StoreError::Operation(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for JsonLinkStore {
    async fn lookup(&self, id: &str) -> Result<Option<LinkEntry>> {
        Ok(self.load().await.lookup(id).cloned())
    }

    async fn list(&self, username: &Username) -> Result<Vec<LinkEntry>> {
        let entries = match self.load().await {
            // Legacy flat layout has no user scoping: every
            // authenticated user sees every legacy entry.
            LinkDocument::Flat(entries) => entries.into_values().collect(),
            LinkDocument::Nested(mut namespaces) => namespaces
                .remove(username.as_str())
                .map(|ns| ns.into_values().collect())
                .unwrap_or_default(),
        };
        Ok(entries)
    }

    async fn create(&self, username: &Username, entry: LinkEntry) -> Result<()> {
        if username.is_reserved() {
            return Err(StoreError::InvalidInput(
                "the legacy namespace cannot own new links".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;
        let document = self.load().await;

        // Ids are public path segments, so the duplicate check spans
        // every namespace, not just the caller's own.
        if document.contains(&entry.id) {
            return Err(StoreError::DuplicateId(entry.id));
        }

        let migrating = document.is_flat();
        let mut namespaces = document.into_nested();
        namespaces
            .entry(username.as_str().to_owned())
            .or_default()
            .insert(entry.id.clone(), entry);

        self.save(&LinkDocument::Nested(namespaces)).await?;
        if migrating {
            info!(path = %self.path.display(), "migrated flat link document to per-user layout");
        }
        Ok(())
    }

    async fn delete(&self, requester: Option<&Username>, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        match self.load().await {
            // Legacy entries are communally owned: no ownership check
            // and no authentication requirement.
            LinkDocument::Flat(mut entries) => {
                let entry = entries
                    .remove(id)
                    .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
                self.assets.remove(&entry.image).await;
                self.save(&LinkDocument::Flat(entries)).await
            }
            LinkDocument::Nested(mut namespaces) => {
                let requester = requester.ok_or(StoreError::Unauthorized)?;
                let owner = owner_of(&namespaces, id)
                    .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
                if owner != requester.as_str() {
                    return Err(StoreError::Forbidden(id.to_string()));
                }

                let entry = namespaces
                    .get_mut(&owner)
                    .and_then(|ns| ns.remove(id))
                    .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
                self.assets.remove(&entry.image).await;
                self.save(&LinkDocument::Nested(namespaces)).await
            }
        }
    }

    async fn ensure_namespace(&self, username: &Username) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut namespaces = self.load().await.into_nested();
        namespaces.entry(username.as_str().to_owned()).or_default();
        self.save(&LinkDocument::Nested(namespaces)).await
    }
}

fn owner_of(namespaces: &NamespaceMap, id: &str) -> Option<String> {
    namespaces
        .iter()
        .find(|(_, ns)| ns.contains_key(id))
        .map(|(user, _)| user.clone())
}
