//! Shared test harness for gateway and store testing
//!
//! Provides `MockTransport`, a [`Transport`] that records every request and
//! answers through a caller-supplied closure, and helpers to build an
//! [`AppContext`] around it.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod store_harness;
//! use store_harness::*;
//! ```

#![allow(dead_code)]

use async_trait::async_trait;
use medoc::prelude::*;
use serde_json::Value;
use std::sync::Mutex;

type Responder = dyn Fn(&HttpRequest) -> Result<Value, TransportError> + Send + Sync;

/// Transport answering from a closure and recording requests
pub struct MockTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new(
        responder: impl Fn(&HttpRequest) -> Result<Value, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `body`
    pub fn ok(body: Value) -> Self {
        Self::new(move |_| Ok(body.clone()))
    }

    /// Always fail with an HTTP status
    pub fn status(status_code: u16, status_message: &str) -> Self {
        let status_message = status_message.to_string();
        Self::new(move |_| {
            Err(TransportError::Status {
                status_code,
                status_message: status_message.clone(),
            })
        })
    }

    /// Always fail before reaching the server
    pub fn network() -> Self {
        Self::new(|_| {
            Err(TransportError::Network {
                message: "connection refused".to_string(),
            })
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(&request)
    }
}

pub const API_BASE: &str = "http://backend.test";

/// Session holding a token, as after login
pub fn logged_in() -> SessionStore {
    SessionStore::with_token("test-token")
}

/// Build an application context around a mock transport
pub fn app_with(transport: Arc<MockTransport>, session: SessionStore) -> AppContext {
    AppContext::new(ClientConfig::new(API_BASE), transport, Arc::new(session))
}

/// Only the error toasts queued so far, as messages
pub fn error_toasts(app: &AppContext) -> Vec<String> {
    app.toasts
        .messages()
        .into_iter()
        .filter(|t| t.kind == ToastKind::Error)
        .map(|t| t.message)
        .collect()
}
