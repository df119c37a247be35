//! Integration tests for the Clementine storefront client.
//!
//! Tests run against a local [`wiremock`] server standing in for the shop
//! API; no live backend is required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p clementine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `renewal` - credential renewal protocol under concurrent 401s
//! - `session_flows` - login, restore, logout, checkout gating
//! - `catalog_caching` - catalog cache behavior and error taxonomy
//! - `persistence` - durable state across simulated restarts

use std::sync::Arc;

use serde_json::json;
use wiremock::MockServer;

use clementine_client::api::ApiClient;
use clementine_client::config::StoreConfig;
use clementine_client::models::Product;
use clementine_client::session::{CredentialPair, CredentialStore};
use clementine_client::storage::{MemoryStorage, Storage};

/// One mock shop: a wiremock server plus a client wired to it over
/// in-memory storage.
pub struct TestShop {
    pub server: MockServer,
    pub api: ApiClient,
    pub storage: Arc<dyn Storage>,
}

impl TestShop {
    /// Start the mock server and build a client pointing at it.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let config = StoreConfig::new(&format!("{}/api", server.uri()))
            .expect("mock server URL is a valid base");
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let api = ApiClient::new(&config, storage.clone()).expect("client builds");
        Self {
            server,
            api,
            storage,
        }
    }

    /// A credential store over the same storage the client uses.
    #[must_use]
    pub fn credentials(&self) -> CredentialStore {
        CredentialStore::new(self.storage.clone())
    }

    /// Persist a credential pair as if a login had happened earlier.
    pub fn seed_credentials(&self, access: &str, refresh: &str) {
        self.credentials()
            .save(&CredentialPair {
                access: access.to_string(),
                refresh: refresh.to_string(),
            })
            .expect("seed credentials");
    }
}

/// A product body in the API's wire shape.
#[must_use]
pub fn product_json(id: i64, name: &str, price: &str, stock: u32) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "price": price,
        "category": 1,
        "category_name": "Widgets",
        "stock": stock,
        "image": null,
        "is_active": true,
        "in_stock": stock > 0,
        "created_at": "2024-05-01T12:00:00Z",
        "updated_at": "2024-05-01T12:00:00Z"
    })
}

/// The same product, parsed into the client's model.
#[must_use]
pub fn product(id: i64, name: &str, price: &str, stock: u32) -> Product {
    serde_json::from_value(product_json(id, name, price, stock)).expect("product parses")
}

/// A category body in the API's wire shape.
#[must_use]
pub fn category_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "products_count": 2,
        "created_at": "2024-05-01T12:00:00Z"
    })
}

/// A `GET /users/me/` body for the default test user.
#[must_use]
pub fn user_json() -> serde_json::Value {
    json!({
        "id": 1,
        "username": "alice",
        "email": "alice@example.com",
        "first_name": "Alice",
        "last_name": "Smith"
    })
}

/// An order body as returned after checkout.
#[must_use]
pub fn order_json(id: i64, total: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user": 1,
        "user_username": "alice",
        "status": "pending",
        "total_amount": total,
        "shipping_address": "1 Main St",
        "phone_number": "+1234567890",
        "items": [{
            "id": 1,
            "product": 7,
            "product_name": "Widget",
            "quantity": 2,
            "price": "100.00",
            "subtotal": total
        }],
        "created_at": "2024-05-01T12:00:00Z",
        "updated_at": "2024-05-01T12:00:00Z"
    })
}
