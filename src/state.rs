use crate::auth::TokenSigner;
use crate::config::AppConfig;
use crate::datastore::DataStore;
use crate::services::{CustomerService, DeviceService};

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: DataStore,
    pub signer: TokenSigner,
    pub customers: CustomerService,
    pub devices: DeviceService,
}

impl AppState {
    pub fn new(config: AppConfig, store: DataStore) -> Self {
        let signer = TokenSigner::new(
            &config.security.jwt_secret,
            config.security.jwt_expiry_hours,
        );
        Self {
            customers: CustomerService::new(store.clone()),
            devices: DeviceService::new(store.clone()),
            config,
            store,
            signer,
        }
    }
}
