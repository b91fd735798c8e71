//! Authenticated fetch gateway
//!
//! Every outbound call goes through [`ApiGateway::fetch`]. It is the only
//! place that knows the base URL, the only place that reacts to a
//! `403 Forbidden` by logging the session out, and the only place that turns
//! transport failures into an [`ApiError`].

use crate::config::ClientConfig;
use crate::core::auth::AuthStore;
use crate::core::error::{ApiError, TransportError};
use crate::core::transport::{HttpRequest, Transport};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;

/// Caller-supplied request options
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add an `Authorization: Bearer <token>` header
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }
}

/// Single chokepoint for outbound HTTP calls
pub struct ApiGateway {
    api_base: String,
    transport: Arc<dyn Transport>,
    auth: Arc<dyn AuthStore>,
}

impl ApiGateway {
    pub fn new(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        auth: Arc<dyn AuthStore>,
    ) -> Self {
        Self {
            api_base: config.api_base.clone(),
            transport,
            auth,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Perform `options` against `api_base + path` and return the parsed body
    ///
    /// On failure the error is logged, a `403` logs the session out (awaited
    /// before returning), and the caller receives the normalized [`ApiError`].
    pub async fn fetch(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let request = HttpRequest {
            method: options.method,
            url: format!("{}{}", self.api_base, path),
            headers: options.headers,
            body: options.body,
        };

        match self.transport.send(request).await {
            Ok(body) => Ok(body),
            Err(err) => {
                self.report_failure(path, &err).await;
                Err(ApiError::from(err))
            }
        }
    }

    async fn report_failure(&self, path: &str, err: &TransportError) {
        match err {
            TransportError::Status {
                status_code,
                status_message,
            } => {
                tracing::error!(
                    path = %path,
                    status = *status_code,
                    "Request to {} failed: {}",
                    path,
                    status_message
                );
                if *status_code == StatusCode::FORBIDDEN.as_u16() {
                    self.auth.logout().await;
                }
            }
            TransportError::Network { .. } | TransportError::Decode { .. } => {
                tracing::error!(path = %path, error = %err, "Network or other error");
            }
        }
    }
}

impl std::fmt::Debug for ApiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiGateway")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}
