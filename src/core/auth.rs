//! Session handling for the Medoc client
//!
//! Stores and the gateway only see the [`AuthStore`] trait:
//! - `token()` reads the current bearer token
//! - `get_token()` makes sure the freshest token is loaded
//! - `logout()` invalidates the session

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;

/// Collaborator owning the session token
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Current session token, if any
    fn token(&self) -> Option<String>;

    /// Load the freshest token. Must be safe to call repeatedly.
    async fn get_token(&self);

    /// Invalidate the session
    async fn logout(&self);
}

/// Source consulted by [`SessionStore::get_token`] when no token is held
///
/// Typically backed by a keyring, a cookie jar or a file written at login.
pub trait TokenSource: Send + Sync {
    fn load(&self) -> Option<String>;
}

impl<F> TokenSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn load(&self) -> Option<String> {
        self()
    }
}

/// In-memory [`AuthStore`]
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct SessionStore {
    token: Arc<RwLock<Option<String>>>,
    source: Option<Arc<dyn TokenSource>>,
    logouts: Arc<watch::Sender<u64>>,
}

impl SessionStore {
    /// Create an empty session
    pub fn new() -> Self {
        let (logouts, _) = watch::channel(0);
        Self {
            token: Arc::new(RwLock::new(None)),
            source: None,
            logouts: Arc::new(logouts),
        }
    }

    /// Create a session already holding `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    /// Attach a token source used to (re)load the token
    pub fn with_source(mut self, source: impl TokenSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Store a token obtained at login
    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.into());
    }

    /// Watch logout notifications; the value counts logouts since creation
    pub fn subscribe_logout(&self) -> watch::Receiver<u64> {
        self.logouts.subscribe()
    }

    /// Number of logouts performed on this session
    pub fn logout_count(&self) -> u64 {
        *self.logouts.borrow()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.token().is_some())
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

#[async_trait]
impl AuthStore for SessionStore {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    async fn get_token(&self) {
        if self.token().is_some() {
            return;
        }
        let Some(source) = &self.source else {
            return;
        };
        if let Some(token) = source.load() {
            tracing::debug!("Session token loaded from token source");
            self.set_token(token);
        }
    }

    async fn logout(&self) {
        {
            let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
            *guard = None;
        }
        self.logouts.send_modify(|count| *count += 1);
        tracing::info!("Session invalidated");
    }
}
