//! Wire types for the shop API.
//!
//! These mirror the JSON the remote API produces; money fields are decimal
//! strings on the wire and `rust_decimal::Decimal` here.

pub mod catalog;
pub mod order;
pub mod user;

pub use catalog::{Category, Product};
pub use order::{CreateOrder, CreateOrderItem, Order, OrderItem};
pub use user::User;
