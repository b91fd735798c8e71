//! Entity stores
//!
//! An [`EntityStore`] holds the ordered collection of one entity type and
//! exposes `fetch_all`, `create` and `delete_one`. Every action follows the
//! same skeleton:
//!
//! ```text
//! guard-check ──▶ no token ──▶ Skipped
//!      │
//!      └──▶ in-flight ──▶ Ok  ──▶ normalize ──▶ Applied
//!                    └──▶ Err ──▶ toast     ──▶ Failed
//! ```
//!
//! Actions never return errors: the store is the last catch boundary and
//! turns every failure into an error toast. The collection lock is never
//! held across an `.await`.

use crate::config::ClientConfig;
use crate::core::auth::AuthStore;
use crate::core::entity::Entity;
use crate::core::error::MedocError;
use crate::core::gateway::{ApiGateway, RequestOptions};
use crate::core::toast::{ToastKind, ToastStore};
use std::marker::PhantomData;
use std::sync::{Arc, RwLock};

/// Collaborators shared by every store of an application session
#[derive(Clone)]
pub struct StoreContext {
    pub config: Arc<ClientConfig>,
    pub gateway: Arc<ApiGateway>,
    pub auth: Arc<dyn AuthStore>,
    pub toasts: ToastStore,
}

/// Result of a store action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// No session token: nothing was sent, nothing changed
    Skipped,
    /// The request succeeded and the local collection was updated
    Applied,
    /// The request or normalization failed; a toast was emitted
    Failed,
}

/// Stateful holder of one entity collection
pub struct EntityStore<E: Entity> {
    context: StoreContext,
    items: RwLock<Arc<Vec<E>>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityStore<E> {
    pub fn new(context: StoreContext) -> Self {
        Self {
            context,
            items: RwLock::new(Arc::new(Vec::new())),
            _entity: PhantomData,
        }
    }

    /// Current collection snapshot
    ///
    /// Actions replace or copy-on-write the inner `Arc`, so a snapshot taken
    /// before an action is never mutated by it.
    pub fn items(&self) -> Arc<Vec<E>> {
        self.items
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Find an entity of the local collection by id
    pub fn get(&self, id: i64) -> Option<E> {
        self.items().iter().find(|item| item.id() == id).cloned()
    }

    /// Request path of the collection (e.g. "/api/v1/drug-brand")
    pub fn collection_path(&self) -> String {
        self.context.config.resource_path(E::RESOURCE)
    }

    /// Replace the collection with the server's list, in server order
    pub async fn fetch_all(&self) -> ActionOutcome {
        let Some(token) = self.session_token().await else {
            return ActionOutcome::Skipped;
        };

        match self.request_list(&token).await {
            Ok(entities) => {
                tracing::debug!(
                    resource = E::RESOURCE,
                    count = entities.len(),
                    "Collection fetched"
                );
                self.replace(entities);
                ActionOutcome::Applied
            }
            Err(err) => self.fail(E::FAILURES.fetch_all, &err),
        }
    }

    /// Create an entity and append the server's version to the collection
    pub async fn create(&self, payload: &E::Payload) -> ActionOutcome {
        let Some(token) = self.session_token().await else {
            return ActionOutcome::Skipped;
        };

        match self.request_create(&token, payload).await {
            Ok(entity) => {
                tracing::debug!(resource = E::RESOURCE, id = entity.id(), "Entity created");
                self.append(entity);
                ActionOutcome::Applied
            }
            Err(err) => self.fail(E::FAILURES.create, &err),
        }
    }

    /// Delete an entity and prune it from the local collection
    pub async fn delete_one(&self, id: i64) -> ActionOutcome {
        let Some(token) = self.session_token().await else {
            return ActionOutcome::Skipped;
        };

        match self.request_delete(&token, id).await {
            Ok(()) => {
                tracing::debug!(resource = E::RESOURCE, id, "Entity deleted");
                self.remove(id);
                ActionOutcome::Applied
            }
            Err(err) => self.fail(E::FAILURES.delete_one, &err),
        }
    }

    async fn request_list(&self, token: &str) -> Result<Vec<E>, MedocError> {
        let body = self
            .context
            .gateway
            .fetch(&self.collection_path(), RequestOptions::get().bearer(token))
            .await?;
        Ok(E::from_json_list(&body)?)
    }

    async fn request_create(&self, token: &str, payload: &E::Payload) -> Result<E, MedocError> {
        let body = serde_json::to_value(payload)?;
        let created = self
            .context
            .gateway
            .fetch(
                &self.collection_path(),
                RequestOptions::post(body).bearer(token),
            )
            .await?;
        Ok(E::from_json(&created)?)
    }

    async fn request_delete(&self, token: &str, id: i64) -> Result<(), MedocError> {
        let path = format!("{}/{}", self.collection_path(), id);
        self.context
            .gateway
            .fetch(&path, RequestOptions::delete().bearer(token))
            .await?;
        Ok(())
    }

    async fn session_token(&self) -> Option<String> {
        self.context.auth.get_token().await;
        let token = self.context.auth.token();
        if token.is_none() {
            tracing::debug!(resource = E::RESOURCE, "No session token, action skipped");
        }
        token
    }

    fn fail(&self, message: &str, err: &MedocError) -> ActionOutcome {
        tracing::warn!(resource = E::RESOURCE, error = %err, "Store action failed");
        self.context
            .toasts
            .set_toast_message(ToastKind::Error, message);
        ActionOutcome::Failed
    }

    fn replace(&self, entities: Vec<E>) {
        *self.items.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(entities);
    }

    fn append(&self, entity: E) {
        let mut guard = self.items.write().unwrap_or_else(|e| e.into_inner());
        Arc::make_mut(&mut *guard).push(entity);
    }

    fn remove(&self, id: i64) {
        let mut guard = self.items.write().unwrap_or_else(|e| e.into_inner());
        if guard.iter().any(|item| item.id() == id) {
            Arc::make_mut(&mut *guard).retain(|item| item.id() != id);
        }
    }
}

impl<E: Entity> std::fmt::Debug for EntityStore<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("resource", &E::RESOURCE)
            .field("len", &self.len())
            .finish()
    }
}
