//! Cart commands.

use clementine_core::ProductId;

use clementine_client::cart::CartStore;

use super::App;

pub fn show(app: &App) {
    let cart = CartStore::load(app.storage.clone());
    if cart.is_empty() {
        println!("Your cart is empty. Browse `clem products` to get started.");
        return;
    }
    for line in cart.cart().lines() {
        println!(
            "{:>4}  {:<30} {:>3} x ${:>8} = ${}",
            line.product_id,
            line.name,
            line.quantity,
            line.unit_price,
            line.subtotal()
        );
    }
    println!("\n{} items, total ${}", cart.count(), cart.total());
}

pub async fn add(
    app: &App,
    product_id: ProductId,
    qty: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = app.catalog.product(product_id).await?;
    if !product.in_stock {
        println!("{} is out of stock.", product.name);
        return Ok(());
    }

    let mut cart = CartStore::load(app.storage.clone());
    cart.add_item(&product, qty);
    println!("Added {} to the cart ({} items).", product.name, cart.count());
    Ok(())
}

pub fn set_quantity(app: &App, product_id: ProductId, qty: u32) {
    let mut cart = CartStore::load(app.storage.clone());
    cart.set_quantity(product_id, qty);
    show(app);
}

pub fn remove(app: &App, product_id: ProductId) {
    let mut cart = CartStore::load(app.storage.clone());
    cart.remove_item(product_id);
    println!("Removed. {} items left.", cart.count());
}

pub fn clear(app: &App) {
    let mut cart = CartStore::load(app.storage.clone());
    cart.clear();
    println!("Cart cleared.");
}
