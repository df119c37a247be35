//! Catalog browsing commands.

use clementine_core::{CategoryId, ProductId};

use clementine_client::models::Product;

use super::App;

pub async fn categories(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let categories = app.catalog.categories().await?;
    if categories.is_empty() {
        println!("No categories.");
        return Ok(());
    }
    for category in categories.iter() {
        println!(
            "{:>4}  {} ({} products)",
            category.id, category.name, category.products_count
        );
    }
    Ok(())
}

pub async fn category_products(
    app: &App,
    id: CategoryId,
) -> Result<(), Box<dyn std::error::Error>> {
    let category = app.catalog.category(id).await?;
    println!("{}", category.name);
    let products = app.catalog.category_products(id).await?;
    print_product_table(&products);
    Ok(())
}

pub async fn products(
    app: &App,
    featured: bool,
    search: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let products = if let Some(query) = search {
        app.catalog.search(query).await?
    } else if featured {
        app.catalog.featured().await?.as_ref().clone()
    } else {
        app.catalog.products().await?.as_ref().clone()
    };
    print_product_table(&products);
    Ok(())
}

pub async fn product(app: &App, id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    let product = app.catalog.product(id).await?;
    println!("{} (#{})", product.name, product.id);
    println!("  {}", product.category_name);
    println!("  ${}", product.price);
    if product.in_stock {
        println!("  {} in stock", product.stock);
    } else {
        println!("  out of stock");
    }
    if !product.description.is_empty() {
        println!("\n{}", product.description);
    }
    Ok(())
}

fn print_product_table(products: &[Product]) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }
    for product in products {
        let stock = if product.in_stock {
            format!("{} in stock", product.stock)
        } else {
            "out of stock".to_string()
        };
        println!(
            "{:>4}  {:<30} ${:>8}  {}",
            product.id, product.name, product.price, stock
        );
    }
}
