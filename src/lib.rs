//! # Medoc client
//!
//! Client-side data-access layer for the Medoc API: reactive entity stores
//! synchronized with the backend, a single authenticated fetch gateway, and
//! form validators producing human-readable field errors.
//!
//! ## Features
//!
//! - **Single Gateway**: every request goes through [`ApiGateway`](core::ApiGateway),
//!   which owns the base URL, normalizes errors and logs the session out on `403`
//! - **Entity Stores**: one [`EntityStore`](core::EntityStore) per entity type,
//!   guarded by the session token, reporting failures as toasts
//! - **Explicit Normalization**: backend JSON is converted into typed records,
//!   date-time strings included
//! - **Form Validation**: pure validators with French messages
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use medoc::prelude::*;
//!
//! let session = Arc::new(SessionStore::with_token("jwt"));
//! let app = AppContext::with_reqwest(ClientConfig::new("https://api.medoc.example"), session);
//!
//! app.drug_brands.fetch_all().await;
//! app.drug_brands.create_named("Ibuprofen").await;
//!
//! for toast in app.toasts.drain() {
//!     println!("{:?}: {}", toast.kind, toast.message);
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod logging;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AuthStore, SessionStore, TokenSource},
        entity::{Entity, FailureMessages},
        error::{ApiError, MedocError, NormalizeError, TransportError, ValidationError},
        gateway::{ApiGateway, RequestOptions},
        store::{ActionOutcome, EntityStore, StoreContext},
        toast::{ToastKind, ToastMessage, ToastStore},
        transport::{HttpRequest, ReqwestTransport, Transport},
        validation::{FieldResult, FormValidator, validators},
    };

    // === Entities ===
    pub use crate::entities::{
        DrugBrand, DrugForm, DrugName, DrugUnit, NewDrugBrand, NewUserDrug, UserDrug,
    };

    // === Config ===
    pub use crate::config::ClientConfig;

    // === Stores ===
    pub use crate::storage::{AppContext, DrugBrandStore, UserDrugStore};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use std::sync::Arc;
}
