//! Order types: history entries and checkout submissions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clementine_core::{OrderItemId, OrderStatus, ProductId, UserId};

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Unit price at the time the order was placed.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
}

/// A placed order, as returned by the orders endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: clementine_core::OrderId,
    pub user: UserId,
    pub user_username: String,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    pub shipping_address: String,
    pub phone_number: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /orders/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrder {
    pub shipping_address: String,
    pub phone_number: String,
    pub items: Vec<CreateOrderItem>,
}

/// One item of a checkout submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_deserializes() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": 3,
                "user": 1,
                "user_username": "alice",
                "status": "pending",
                "total_amount": "200.00",
                "shipping_address": "1 Main St",
                "phone_number": "+1234567890",
                "items": [{
                    "id": 9,
                    "product": 7,
                    "product_name": "Widget",
                    "quantity": 2,
                    "price": "100.00",
                    "subtotal": "200.00"
                }],
                "created_at": "2024-05-01T12:00:00Z",
                "updated_at": "2024-05-01T12:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_amount, Decimal::new(20000, 2));
    }

    #[test]
    fn test_create_order_serializes_item_ids() {
        let payload = CreateOrder {
            shipping_address: "1 Main St".to_string(),
            phone_number: "+1234567890".to_string(),
            items: vec![CreateOrderItem {
                product_id: ProductId::new(7),
                quantity: 2,
            }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["items"][0]["product_id"], serde_json::json!(7));
        assert_eq!(json["items"][0]["quantity"], serde_json::json!(2));
    }
}
