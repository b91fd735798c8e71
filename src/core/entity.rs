//! Entity trait defining what a store needs to know about a domain record

use crate::core::error::NormalizeError;
use crate::core::normalize;
use serde::Serialize;
use serde_json::Value;

/// User-facing messages shown when a store action fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureMessages {
    pub fetch_all: &'static str,
    pub create: &'static str,
    pub delete_one: &'static str,
}

/// Base trait for every entity held by an [`EntityStore`](crate::core::store::EntityStore).
///
/// An entity:
/// - lives under a REST resource (e.g. "drug-brand")
/// - has a numeric identity
/// - is built from untyped JSON by an explicit normalization function
/// - is created from a caller-built payload, sent as-is
pub trait Entity: Clone + Send + Sync + 'static {
    /// Body sent by `create`
    type Payload: Serialize + Send + Sync;

    /// Resource name used in URLs (e.g. "drug-brand")
    const RESOURCE: &'static str;

    /// Toast messages for failed store actions
    const FAILURES: FailureMessages;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> i64;

    /// Build an entity from a backend payload
    fn from_json(value: &Value) -> Result<Self, NormalizeError>;

    /// Build a list of entities from a backend array, keeping its order
    fn from_json_list(value: &Value) -> Result<Vec<Self>, NormalizeError> {
        normalize::as_array(Self::RESOURCE, value)?
            .iter()
            .map(Self::from_json)
            .collect()
    }
}
