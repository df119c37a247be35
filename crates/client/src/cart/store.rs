//! Cart persistence.

use std::sync::Arc;

use rust_decimal::Decimal;

use clementine_core::ProductId;

use crate::models::Product;
use crate::storage::{Storage, keys};

use super::Cart;

/// A [`Cart`] bound to durable storage.
///
/// Every mutation is persisted before the call returns, so a reload always
/// observes the latest state. Persistence failures are logged and the
/// in-memory cart stays authoritative for the rest of the session - cart
/// operations never fail outwardly.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn Storage>,
}

impl CartStore {
    /// Rehydrate the cart from storage.
    ///
    /// A missing or corrupt persisted payload yields an empty cart, never
    /// an error.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let cart = match Self::try_load(storage.as_ref()) {
            Ok(cart) => cart,
            Err(e) => {
                tracing::debug!(error = %e, "persisted cart unreadable, starting empty");
                Cart::new()
            }
        };
        Self { cart, storage }
    }

    /// The fallible load, collapsed to empty at the call site above.
    fn try_load(storage: &dyn Storage) -> Result<Cart, Box<dyn std::error::Error>> {
        match storage.get(keys::CART)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Cart::new()),
        }
    }

    fn persist(&self) {
        let serialized = serde_json::to_string(&self.cart).expect("cart serializes");
        if let Err(e) = self.storage.set(keys::CART, &serialized) {
            tracing::warn!(error = %e, "failed to persist cart");
        }
    }

    /// See [`Cart::add_item`].
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        self.cart.add_item(product, quantity);
        self.persist();
    }

    /// See [`Cart::set_quantity`].
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        self.cart.set_quantity(product_id, quantity);
        self.persist();
    }

    /// See [`Cart::remove_item`].
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.cart.remove_item(product_id);
        self.persist();
    }

    /// See [`Cart::clear`].
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// The current cart state.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// See [`Cart::total`].
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// See [`Cart::count`].
    #[must_use]
    pub fn count(&self) -> u32 {
        self.cart.count()
    }

    /// See [`Cart::is_empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }
}
