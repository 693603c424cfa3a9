//! RocketShoes cart CLI.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart
//! rocketshoes-cart show
//!
//! # Add one unit of product 1
//! rocketshoes-cart add 1
//!
//! # Remove product 1 from the cart
//! rocketshoes-cart remove 1
//!
//! # Increase product 1 by two units / put one unit back
//! rocketshoes-cart update 1 2
//! rocketshoes-cart update 1 -1
//! ```
//!
//! Operations are fail-soft at this boundary: a failed operation prints a
//! toast-style message, leaves the persisted cart untouched, and exits
//! non-zero.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use rocketshoes_cart::{
    CartConfig, CartError, CartItem, CartManager, CatalogClient, FileStore, ProductId,
};

#[derive(Parser)]
#[command(name = "rocketshoes-cart")]
#[command(author, version, about = "RocketShoes cart management")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cart contents
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Product id from the catalog
        product_id: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id from the catalog
        product_id: i64,
    },
    /// Adjust a product's quantity by a signed delta
    Update {
        /// Product id from the catalog
        product_id: i64,
        /// Signed quantity change (negative to decrement)
        #[arg(allow_hyphen_values = true)]
        delta: i32,
    },
}

/// Which operation failed, for picking the user-facing message.
#[derive(Clone, Copy)]
enum CartOp {
    Add,
    Remove,
    Update,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocketshoes_cart=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let catalog = CatalogClient::new(&config);
    let store = FileStore::new(&config.storage_path);
    let mut manager = CartManager::load(catalog, store);

    let (op, result) = match cli.command {
        Commands::Show => {
            render_cart(manager.items());
            return Ok(());
        }
        Commands::Add { product_id } => (
            CartOp::Add,
            manager.add_product(ProductId::new(product_id)).await,
        ),
        Commands::Remove { product_id } => (
            CartOp::Remove,
            manager.remove_product(ProductId::new(product_id)),
        ),
        Commands::Update { product_id, delta } => (
            CartOp::Update,
            manager
                .update_product_amount(ProductId::new(product_id), delta)
                .await,
        ),
    };

    match result {
        Ok(()) => {
            render_cart(manager.items());
            Ok(())
        }
        Err(err) => {
            println!("{}", user_message(op, &err));
            Err(Box::new(err))
        }
    }
}

/// Toast-style message for a failed operation.
fn user_message(op: CartOp, err: &CartError) -> &'static str {
    match err {
        CartError::OutOfStock(_) => "Requested quantity is out of stock",
        _ => match op {
            CartOp::Add => "Could not add product to cart",
            CartOp::Remove => "Could not remove product from cart",
            CartOp::Update => "Could not change product quantity",
        },
    }
}

fn render_cart(items: &[CartItem]) {
    if items.is_empty() {
        println!("Cart is empty");
        return;
    }

    let mut subtotal = 0.0;
    for item in items {
        let line_total = item.product.price * f64::from(item.amount);
        subtotal += line_total;
        println!(
            "{:>4}  {:<40} x{:<3} {:>10}",
            item.product.id,
            item.product.title,
            item.amount,
            format_price(line_total),
        );
    }
    println!("{:>62}", format!("subtotal {}", format_price(subtotal)));
}

/// Format a price as a display string.
fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}
