//! Per-session wiring of collaborators and stores

use crate::config::ClientConfig;
use crate::core::auth::AuthStore;
use crate::core::gateway::ApiGateway;
use crate::core::store::{EntityStore, StoreContext};
use crate::core::toast::ToastStore;
use crate::core::transport::{ReqwestTransport, Transport};
use crate::entities::{DrugBrand, NewDrugBrand, UserDrug};
use std::sync::Arc;

/// Store of the drug brand catalogue
pub type DrugBrandStore = EntityStore<DrugBrand>;

/// Store of the current user's drugs
pub type UserDrugStore = EntityStore<UserDrug>;

impl EntityStore<DrugBrand> {
    /// Create a brand from its name
    pub async fn create_named(&self, name: &str) -> crate::core::store::ActionOutcome {
        self.create(&NewDrugBrand::new(name)).await
    }
}

/// Everything an application session needs, created once per session
///
/// Both stores share one gateway, one auth store and one toast queue.
pub struct AppContext {
    pub config: Arc<ClientConfig>,
    pub auth: Arc<dyn AuthStore>,
    pub toasts: ToastStore,
    pub gateway: Arc<ApiGateway>,
    pub drug_brands: DrugBrandStore,
    pub user_drugs: UserDrugStore,
}

impl AppContext {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        auth: Arc<dyn AuthStore>,
    ) -> Self {
        let gateway = Arc::new(ApiGateway::new(&config, transport, auth.clone()));
        let toasts = ToastStore::new(config.toast_capacity);
        let context = StoreContext {
            config: Arc::new(config),
            gateway,
            auth,
            toasts,
        };

        Self {
            config: context.config.clone(),
            auth: context.auth.clone(),
            toasts: context.toasts.clone(),
            gateway: context.gateway.clone(),
            drug_brands: EntityStore::new(context.clone()),
            user_drugs: EntityStore::new(context),
        }
    }

    /// Build a session talking HTTP through `reqwest`
    pub fn with_reqwest(config: ClientConfig, auth: Arc<dyn AuthStore>) -> Self {
        Self::new(config, Arc::new(ReqwestTransport::new()), auth)
    }

    /// Collaborators to hand to additional stores
    pub fn store_context(&self) -> StoreContext {
        StoreContext {
            config: self.config.clone(),
            gateway: self.gateway.clone(),
            auth: self.auth.clone(),
            toasts: self.toasts.clone(),
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("drug_brands", &self.drug_brands)
            .field("user_drugs", &self.user_drugs)
            .finish_non_exhaustive()
    }
}
