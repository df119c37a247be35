//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod session;

use std::sync::Arc;

use clementine_client::api::{ApiClient, CatalogClient, OrdersClient};
use clementine_client::config::StoreConfig;
use clementine_client::session::Session;
use clementine_client::storage::{FileStorage, Storage};

/// Shared handles for one CLI invocation.
pub struct App {
    pub session: Session,
    pub catalog: CatalogClient,
    pub orders: OrdersClient,
    pub storage: Arc<dyn Storage>,
}

impl App {
    /// Load configuration, open storage, and wire up the clients.
    pub fn bootstrap() -> Result<Self, Box<dyn std::error::Error>> {
        let config = StoreConfig::from_env()?;
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(&config.data_dir)?);

        let api = ApiClient::new(&config, storage.clone())?;
        api.set_session_expired_hook(|| {
            println!("Your session has expired. Run `clem login` to sign in again.");
        });

        Ok(Self {
            session: Session::new(api.clone()),
            catalog: CatalogClient::new(api.clone()),
            orders: OrdersClient::new(api),
            storage,
        })
    }
}
