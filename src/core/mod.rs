//! Core module containing the gateway, stores and their collaborators

pub mod auth;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod store;
pub mod toast;
pub mod transport;
pub mod validation;

pub use auth::{AuthStore, SessionStore, TokenSource};
pub use entity::{Entity, FailureMessages};
pub use error::{ApiError, MedocError, NormalizeError, TransportError, ValidationError};
pub use gateway::{ApiGateway, RequestOptions};
pub use store::{ActionOutcome, EntityStore, StoreContext};
pub use toast::{ToastKind, ToastMessage, ToastStore};
pub use transport::{HttpRequest, ReqwestTransport, Transport};
pub use validation::{FieldResult, FormValidator};
