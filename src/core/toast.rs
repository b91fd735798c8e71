//! Toast notifications
//!
//! The ToastStore is the process-wide notification queue. Stores push
//! `(kind, message)` pairs into it and move on; UI layers either read the
//! queued history or subscribe to the broadcast channel. The history holds at
//! most `capacity` toasts; the oldest ones are evicted first.
//!
//! ```text
//! DrugBrandStore ──┐
//!                  ├──▶ ToastStore::set_toast_message() ──▶ queue
//! UserDrugStore ───┘                                    ──▶ broadcast subscribers
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

/// Severity of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A transient user-facing notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToastMessage {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ToastMessage {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Queue + broadcast of toast notifications
///
/// Cheap to clone (Arc internally); every clone feeds the same queue.
#[derive(Debug, Clone)]
pub struct ToastStore {
    sender: broadcast::Sender<ToastMessage>,
    queue: Arc<Mutex<VecDeque<ToastMessage>>>,
    capacity: usize,
}

impl ToastStore {
    /// Create a store keeping at most `capacity` toasts, both in the queue
    /// and in the broadcast channel buffer
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            queue: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Maximum number of queued toasts
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Push a toast. Fire-and-forget: never fails, even without subscribers.
    pub fn set_toast_message(&self, kind: ToastKind, message: impl Into<String>) -> ToastMessage {
        let toast = ToastMessage::new(kind, message);
        {
            let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
            while queue.len() >= self.capacity {
                queue.pop_front();
            }
            queue.push_back(toast.clone());
        }
        // send() only fails when nobody listens
        let _ = self.sender.send(toast.clone());
        toast
    }

    /// Toasts still queued, oldest first
    pub fn messages(&self) -> Vec<ToastMessage> {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    /// Take every queued toast, leaving the queue empty
    pub fn drain(&self) -> Vec<ToastMessage> {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect()
    }

    /// Subscribe to toasts pushed after this call
    pub fn subscribe(&self) -> broadcast::Receiver<ToastMessage> {
        self.sender.subscribe()
    }

    /// Same as [`subscribe`](Self::subscribe), as a `Stream`
    pub fn stream(&self) -> BroadcastStream<ToastMessage> {
        BroadcastStream::new(self.subscribe())
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new(64)
    }
}
