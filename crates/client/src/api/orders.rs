//! Order endpoints. Mutable state, never cached.

use tracing::instrument;

use clementine_core::OrderId;

use crate::error::Result;
use crate::models::{CreateOrder, Order};

use super::{ApiClient, ListResponse};

/// Client for order history and checkout submission.
#[derive(Clone)]
pub struct OrdersClient {
    api: ApiClient,
}

impl OrdersClient {
    /// Create an orders client sharing the given API client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Get the orders visible to the current session.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Order>> {
        let response: ListResponse<Order> = self.api.get_json("orders/").await?;
        Ok(response.into_vec())
    }

    /// Get the authenticated customer's own orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>> {
        let response: ListResponse<Order> = self.api.get_json("orders/my_orders/").await?;
        Ok(response.into_vec())
    }

    /// Get a single order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get(&self, id: OrderId) -> Result<Order> {
        self.api.get_json(&format!("orders/{id}/")).await
    }

    /// Submit a new order.
    ///
    /// # Errors
    ///
    /// Returns `Validation` with the server's message when stock or input
    /// checks fail.
    #[instrument(skip(self, order))]
    pub async fn create(&self, order: &CreateOrder) -> Result<Order> {
        self.api.post_json("orders/", order).await
    }

    /// Cancel a pending order.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the order is no longer cancellable.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn cancel(&self, id: OrderId) -> Result<Order> {
        self.api
            .patch_json(&format!("orders/{id}/cancel/"), &serde_json::json!({}))
            .await
    }
}
