//! Checkout and order history commands.

use clementine_core::OrderId;

use clementine_client::cart::CartStore;
use clementine_client::models::Order;
use clementine_client::session::CheckoutError;

use super::App;

pub async fn checkout(
    app: &App,
    address: &str,
    phone: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    // Re-attach the persisted session so checkout works across invocations.
    if app.session.restore().await.is_none() {
        println!("You need to log in before checking out.");
        return Ok(());
    }

    let mut cart = CartStore::load(app.storage.clone());
    match app.session.place_order(&mut cart, address, phone).await {
        Ok(order) => {
            println!("Order #{} placed, total ${}.", order.id, order.total_amount);
        }
        Err(CheckoutError::NotAuthenticated) => {
            println!("You need to log in before checking out.");
        }
        Err(CheckoutError::EmptyCart) => {
            println!("Your cart is empty. Add something first.");
        }
        Err(CheckoutError::Api(e)) => println!("Checkout failed: {}", e.display_message()),
    }
    Ok(())
}

pub async fn list(app: &App, mine: bool) -> Result<(), Box<dyn std::error::Error>> {
    app.session.restore().await;
    let orders = if mine {
        app.orders.my_orders().await?
    } else {
        app.orders.list().await?
    };
    if orders.is_empty() {
        println!("No orders.");
        return Ok(());
    }
    for order in &orders {
        println!(
            "{:>4}  {:<12} ${:>8}  {}",
            order.id,
            order.status.to_string(),
            order.total_amount,
            order.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

pub async fn show(app: &App, id: OrderId) -> Result<(), Box<dyn std::error::Error>> {
    app.session.restore().await;
    let order = app.orders.get(id).await?;
    print_order(&order);
    Ok(())
}

pub async fn cancel(app: &App, id: OrderId) -> Result<(), Box<dyn std::error::Error>> {
    app.session.restore().await;
    let order = app.orders.cancel(id).await?;
    println!("Order #{} is now {}.", order.id, order.status);
    Ok(())
}

fn print_order(order: &Order) {
    println!(
        "Order #{} - {} - placed {}",
        order.id,
        order.status,
        order.created_at.format("%Y-%m-%d %H:%M")
    );
    println!("Ship to: {}", order.shipping_address);
    println!("Phone:   {}", order.phone_number);
    for item in &order.items {
        println!(
            "  {:<30} {:>3} x ${:>8} = ${}",
            item.product_name, item.quantity, item.price, item.subtotal
        );
    }
    println!("Total: ${}", order.total_amount);
}
