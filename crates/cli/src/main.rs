//! Clementine CLI - a command-line storefront.
//!
//! # Usage
//!
//! ```bash
//! # Log in and check the session
//! clem login -u alice -p hunter2
//! clem whoami
//!
//! # Browse the catalog
//! clem categories
//! clem products --featured
//! clem products --search widget
//!
//! # Build a cart and check out
//! clem cart add 7 --qty 2
//! clem cart show
//! clem checkout --address "1 Main St" --phone +1234567890
//!
//! # Order history
//! clem orders --mine
//! clem orders cancel 3
//! ```
//!
//! Configuration comes from the environment (see `clementine-client`):
//! `CLEMENTINE_API_URL` is required.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Stdout is this binary's user interface.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use clementine_core::{CategoryId, OrderId, ProductId};

mod commands;

#[derive(Parser)]
#[command(name = "clem")]
#[command(author, version, about = "Clementine storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the store
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Log out and forget the stored session
    Logout,
    /// Show the currently logged-in user
    Whoami,
    /// List categories
    Categories {
        /// Show the products of one category instead
        #[arg(long)]
        products_of: Option<i64>,
    },
    /// List or search products
    Products {
        /// Only featured products
        #[arg(long)]
        featured: bool,

        /// Search by name
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one product
    Product {
        /// Product ID
        id: i64,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Submit the cart as an order
    Checkout {
        /// Shipping address
        #[arg(long)]
        address: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,
    },
    /// Order history
    Orders {
        #[command(subcommand)]
        action: Option<OrdersAction>,

        /// Only the current user's orders
        #[arg(long)]
        mine: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: i64,

        /// Quantity to add
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    /// Set a line's quantity
    Set {
        /// Product ID
        product_id: i64,

        /// New quantity
        qty: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// Show one order
    Show {
        /// Order ID
        id: i64,
    },
    /// Cancel a pending order
    Cancel {
        /// Order ID
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clementine=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let app = commands::App::bootstrap()?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::session::login(&app, &username, &password).await;
        }
        Commands::Logout => commands::session::logout(&app),
        Commands::Whoami => commands::session::whoami(&app).await,
        Commands::Categories { products_of } => match products_of {
            Some(id) => commands::catalog::category_products(&app, CategoryId::new(id)).await?,
            None => commands::catalog::categories(&app).await?,
        },
        Commands::Products { featured, search } => {
            commands::catalog::products(&app, featured, search.as_deref()).await?;
        }
        Commands::Product { id } => commands::catalog::product(&app, ProductId::new(id)).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&app),
            CartAction::Add { product_id, qty } => {
                commands::cart::add(&app, ProductId::new(product_id), qty).await?;
            }
            CartAction::Set { product_id, qty } => {
                commands::cart::set_quantity(&app, ProductId::new(product_id), qty);
            }
            CartAction::Remove { product_id } => {
                commands::cart::remove(&app, ProductId::new(product_id));
            }
            CartAction::Clear => commands::cart::clear(&app),
        },
        Commands::Checkout { address, phone } => {
            commands::orders::checkout(&app, &address, &phone).await?;
        }
        Commands::Orders { action, mine } => match action {
            Some(OrdersAction::Show { id }) => {
                commands::orders::show(&app, OrderId::new(id)).await?;
            }
            Some(OrdersAction::Cancel { id }) => {
                commands::orders::cancel(&app, OrderId::new(id)).await?;
            }
            None => commands::orders::list(&app, mine).await?,
        },
    }
    Ok(())
}
