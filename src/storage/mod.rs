//! Concrete stores and the application session that owns them

pub mod app_context;

pub use app_context::{AppContext, DrugBrandStore, UserDrugStore};
