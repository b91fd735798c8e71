//! HTTP transport seam
//!
//! The gateway never talks to the network directly: it hands an
//! [`HttpRequest`] to a [`Transport`]. [`ReqwestTransport`] is the production
//! implementation; tests plug in recording transports.

use crate::core::error::TransportError;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// A fully resolved outbound request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL (base URL + request path)
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body, sent for POST-like requests
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Value of the first header named `name` (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Performs HTTP requests and decodes JSON responses
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the decoded body
    ///
    /// An empty success body decodes to `Value::Null`.
    async fn send(&self, request: HttpRequest) -> Result<Value, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client (custom TLS, proxies, default headers...)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, TransportError> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| TransportError::Network {
            message: e.to_string(),
        })?;

        let status = response.status();
        // reqwest does not expose the reason phrase sent on the wire (and
        // HTTP/2 has none), so the canonical phrase of the code stands in
        if !status.is_success() {
            return Err(TransportError::Status {
                status_code: status.as_u16(),
                status_message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| TransportError::Network {
            message: e.to_string(),
        })?;
        decode_body(&bytes)
    }
}

fn decode_body(bytes: &[u8]) -> Result<Value, TransportError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| TransportError::Decode {
        message: e.to_string(),
    })
}
