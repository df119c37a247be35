//! Client-side shopping cart.
//!
//! [`Cart`] is the pure state machine: an ordered set of lines, one per
//! product, with every quantity clamped into `[1, stock_limit]`. Totals are
//! derived on every call, never cached. [`CartStore`] adds persistence:
//! the full cart is written to durable storage after every mutation and
//! rehydrated on startup, with a corrupt or missing payload collapsing to
//! an empty cart.

mod store;

pub use store::CartStore;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clementine_core::ProductId;

use crate::models::Product;

/// One product entry in the cart.
///
/// Unique per `product_id`; `quantity` always satisfies
/// `1 <= quantity <= stock_limit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    pub quantity: u32,
    /// Stock ceiling captured when the product was added.
    pub stock_limit: u32,
    #[serde(default)]
    pub image: Option<String>,
    pub category_name: String,
}

impl CartLine {
    fn new(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            stock_limit: product.stock,
            image: product.image.clone(),
            category_name: product.category_name.clone(),
        }
    }

    /// Line subtotal: `unit_price * quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Ordered cart lines; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines. Empty carts block checkout.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of a product.
    ///
    /// An existing line is incremented; a new line is appended. Either way
    /// the resulting quantity is clamped into `[1, stock_limit]`. Products
    /// with zero stock are ignored, since no quantity could satisfy the
    /// invariant.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if product.stock == 0 {
            tracing::debug!(product_id = %product.id, "ignoring add of out-of-stock product");
            return;
        }

        if let Some(line) = self.line_mut(product.id) {
            line.quantity = clamp_quantity(line.quantity.saturating_add(quantity), line.stock_limit);
        } else {
            let quantity = clamp_quantity(quantity, product.stock);
            self.lines.push(CartLine::new(product, quantity));
        }
    }

    /// Set a line's quantity, clamped into `[1, stock_limit]`.
    ///
    /// A request for zero is treated as one, never as removal. No-op if the
    /// product is not in the cart.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = clamp_quantity(quantity, line.stock_limit);
        }
    }

    /// Remove a line; no-op if absent.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total price across all lines. Recomputed on every call.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Total unit count across all lines. Recomputed on every call.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product_id == product_id)
    }
}

/// Clamp a requested quantity into the valid range for a line.
const fn clamp_quantity(quantity: u32, stock_limit: u32) -> u32 {
    if quantity < 1 {
        1
    } else if quantity > stock_limit {
        stock_limit
    } else {
        quantity
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;
    use clementine_core::CategoryId;

    pub(crate) fn product(id: i64, price: i64, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Decimal::from(price),
            category: CategoryId::new(1),
            category_name: "Widgets".to_string(),
            stock,
            image: None,
            is_active: true,
            in_stock: stock > 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_worked_example() {
        // One line {id 7, price 100, qty 2, stock 5}
        let mut cart = Cart::new();
        cart.add_item(&product(7, 100, 5), 2);

        assert_eq!(cart.total(), Decimal::from(200));
        assert_eq!(cart.count(), 2);

        cart.set_quantity(ProductId::new(7), 1);
        assert_eq!(cart.total(), Decimal::from(100));
    }

    #[test]
    fn test_duplicate_add_increments_single_line() {
        let mut cart = Cart::new();
        let widget = product(7, 100, 5);
        cart.add_item(&widget, 1);
        cart.add_item(&widget, 2);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_add_clamps_to_stock() {
        let mut cart = Cart::new();
        let widget = product(7, 100, 5);
        cart.add_item(&widget, 10);
        assert_eq!(cart.lines()[0].quantity, 5);

        // increments saturate at the stock limit too
        cart.add_item(&widget, 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_set_quantity_clamps_both_ends() {
        let mut cart = Cart::new();
        cart.add_item(&product(7, 100, 5), 2);

        cart.set_quantity(ProductId::new(7), 0);
        assert_eq!(cart.lines()[0].quantity, 1, "zero means one, not removal");

        cart.set_quantity(ProductId::new(7), 99);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_quantity_invariant_over_mixed_sequence() {
        let mut cart = Cart::new();
        let a = product(1, 10, 3);
        let b = product(2, 25, 1);

        cart.add_item(&a, 0);
        cart.add_item(&b, 7);
        cart.add_item(&a, 5);
        cart.set_quantity(ProductId::new(2), 0);
        cart.set_quantity(ProductId::new(1), 2);

        for line in cart.lines() {
            assert!(line.quantity >= 1);
            assert!(line.quantity <= line.stock_limit);
        }
    }

    #[test]
    fn test_total_matches_live_line_state() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 10, 5), 2);
        cart.add_item(&product(2, 25, 5), 1);
        assert_eq!(cart.total(), Decimal::from(45));
        assert_eq!(cart.count(), 3);

        cart.remove_item(ProductId::new(2));
        assert_eq!(cart.total(), Decimal::from(20));
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_remove_last_line_empties_cart() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 10, 5), 1);
        assert!(!cart.is_empty());

        cart.remove_item(ProductId::new(1));
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_clear_from_any_state() {
        let mut cart = Cart::new();
        cart.clear();
        assert!(cart.is_empty());

        cart.add_item(&product(1, 10, 5), 2);
        cart.add_item(&product(2, 25, 5), 1);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 10, 5), 1);
        cart.remove_item(ProductId::new(99));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_out_of_stock_product_not_added() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 10, 0), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_item(&product(3, 1, 9), 1);
        cart.add_item(&product(1, 1, 9), 1);
        cart.add_item(&product(2, 1, 9), 1);
        // re-adding does not move a line
        cart.add_item(&product(1, 1, 9), 1);

        let ids: Vec<i64> = cart.lines().iter().map(|l| l.product_id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_fractional_prices_sum_exactly() {
        let mut cart = Cart::new();
        let mut p = product(1, 0, 10);
        p.price = Decimal::new(1999, 2); // 19.99
        cart.add_item(&p, 3);
        assert_eq!(cart.total(), Decimal::new(5997, 2));
    }
}
