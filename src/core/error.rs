//! Typed error handling for the Medoc client
//!
//! This module provides the error type hierarchy used across the client so
//! that callers never have to probe an unknown error shape.
//!
//! # Error Categories
//!
//! - [`TransportError`]: Raw failures reported by the HTTP transport
//! - [`MedocError`]: Failure of a store action, logged then toasted
//! - [`ApiError`]: The normalized error returned by the gateway
//! - [`NormalizeError`]: A payload did not match the entity contract
//! - [`ConfigError`]: Errors related to configuration loading
//! - [`ValidationError`]: Collected form validation errors
//!
//! # Example
//!
//! ```rust,ignore
//! match gateway.fetch("/api/v1/drug-brand", RequestOptions::get()).await {
//!     Ok(body) => println!("{body}"),
//!     Err(err) if err.is_forbidden() => println!("session revoked"),
//!     Err(err) => eprintln!("{} ({})", err.status_message, err.status_code),
//! }
//! ```

use reqwest::StatusCode;
use serde::Serialize;
use std::fmt;

/// Message used when a failure carries no usable status message
pub const UNKNOWN_ERROR_MESSAGE: &str = "Une erreur inconnue est survenue";

/// Failure of a store action
///
/// Store actions catch it, log it and turn it into an error toast.
#[derive(Debug)]
pub enum MedocError {
    /// Normalized gateway error
    Api(ApiError),

    /// The response did not match the entity contract
    Normalize(NormalizeError),

    /// The outbound payload could not be serialized to JSON
    Payload(String),
}

impl fmt::Display for MedocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MedocError::Api(e) => write!(f, "{}", e),
            MedocError::Normalize(e) => write!(f, "{}", e),
            MedocError::Payload(message) => write!(f, "Invalid payload: {}", message),
        }
    }
}

impl std::error::Error for MedocError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MedocError::Api(e) => Some(e),
            MedocError::Normalize(e) => Some(e),
            MedocError::Payload(_) => None,
        }
    }
}

impl From<serde_json::Error> for MedocError {
    fn from(err: serde_json::Error) -> Self {
        MedocError::Payload(err.to_string())
    }
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Failure reported by a [`Transport`](crate::core::transport::Transport)
///
/// The variants are the only shapes a transport may report; the gateway
/// matches on them instead of inspecting optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with a non-success status
    Status {
        status_code: u16,
        status_message: String,
    },

    /// The request never produced a response (DNS, refused connection, timeout)
    Network { message: String },

    /// The response body could not be decoded as JSON
    Decode { message: String },
}

impl TransportError {
    /// Status code carried by the failure, if the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status_code, .. } => Some(*status_code),
            TransportError::Network { .. } | TransportError::Decode { .. } => None,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Status {
                status_code,
                status_message,
            } => write!(f, "HTTP {}: {}", status_code, status_message),
            TransportError::Network { message } => write!(f, "Network error: {}", message),
            TransportError::Decode { message } => {
                write!(f, "Failed to decode response body: {}", message)
            }
        }
    }
}

impl std::error::Error for TransportError {}

// =============================================================================
// API Errors
// =============================================================================

/// Normalized error returned by the gateway
///
/// Serializes as `{"statusCode": .., "statusMessage": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub status_code: u16,
    pub status_message: String,
}

impl ApiError {
    /// Create an error with an explicit status code and message
    pub fn new(status_code: u16, status_message: impl Into<String>) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
        }
    }

    /// Whether the server refused the session
    pub fn is_forbidden(&self) -> bool {
        self.status_code == StatusCode::FORBIDDEN.as_u16()
    }
}

impl From<&TransportError> for ApiError {
    fn from(err: &TransportError) -> Self {
        match err {
            TransportError::Status {
                status_code,
                status_message,
            } => {
                let status_code = if *status_code == 0 {
                    StatusCode::INTERNAL_SERVER_ERROR.as_u16()
                } else {
                    *status_code
                };
                let status_message = if status_message.is_empty() {
                    UNKNOWN_ERROR_MESSAGE.to_string()
                } else {
                    status_message.clone()
                };
                ApiError::new(status_code, status_message)
            }
            TransportError::Network { .. } | TransportError::Decode { .. } => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                UNKNOWN_ERROR_MESSAGE,
            ),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::from(&err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error {}: {}", self.status_code, self.status_message)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for MedocError {
    fn from(err: ApiError) -> Self {
        MedocError::Api(err)
    }
}

// =============================================================================
// Normalize Errors
// =============================================================================

/// Errors raised while converting an untyped payload into an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// A required field is absent or null
    MissingField { entity_type: String, field: String },

    /// A field is present but holds the wrong JSON type
    InvalidType {
        entity_type: String,
        field: String,
        expected: &'static str,
    },

    /// A date-time string could not be parsed
    InvalidDateTime {
        entity_type: String,
        field: String,
        value: String,
    },

    /// The payload itself has the wrong shape (e.g. object instead of array)
    UnexpectedShape {
        entity_type: String,
        expected: &'static str,
    },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::MissingField { entity_type, field } => {
                write!(f, "{}: missing required field '{}'", entity_type, field)
            }
            NormalizeError::InvalidType {
                entity_type,
                field,
                expected,
            } => write!(
                f,
                "{}: field '{}' must be {}",
                entity_type, field, expected
            ),
            NormalizeError::InvalidDateTime {
                entity_type,
                field,
                value,
            } => write!(
                f,
                "{}: field '{}' is not a valid date-time (value: {})",
                entity_type, field, value
            ),
            NormalizeError::UnexpectedShape {
                entity_type,
                expected,
            } => write!(f, "{}: expected {} payload", entity_type, expected),
        }
    }
}

impl std::error::Error for NormalizeError {}

impl From<NormalizeError> for MedocError {
    fn from(err: NormalizeError) -> Self {
        MedocError::Normalize(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { path, message } => {
                write!(f, "Failed to read '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// Validation Errors
// =============================================================================

/// Field errors collected from a whole form, in form order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldValidationError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldValidationError>) -> Self {
        Self { errors }
    }

    pub fn field_errors(&self) -> &[FieldValidationError] {
        &self.errors
    }

    pub fn into_field_errors(self) -> Vec<FieldValidationError> {
        self.errors
    }
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "Validation errors: {}", msgs.join(", "))
    }
}

impl std::error::Error for ValidationError {}
