//! Lingonberry CLI - Inspect and edit a persisted cart from the shell.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart contents and total
//! lingon show
//!
//! # Add one unit of a product
//! lingon add -i prod-1 -n "Widget" -p 19.99
//!
//! # Set a line's quantity (clamped to 1..=99)
//! lingon set-quantity -i prod-1 -q 3
//!
//! # Remove a line / empty the cart
//! lingon remove -i prod-1
//! lingon clear
//! ```
//!
//! The cart lives in a single JSON file (`--file`, or `CART_FILE` in the
//! environment), the same snapshot format the storefront persists.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lingonberry_cart::{CartStore, Product, format_price_sek};

mod storage;

use storage::JsonFileStore;

#[derive(Parser)]
#[command(name = "lingon")]
#[command(author, version, about = "Lingonberry cart tools")]
struct Cli {
    /// Cart snapshot file
    #[arg(long, env = "CART_FILE", default_value = "cart.json", global = true)]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart contents and total
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        #[arg(short, long)]
        id: String,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price
        #[arg(short, long)]
        price: f64,

        /// Product image URL
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Remove a line
    Remove {
        /// Cart line id
        #[arg(short, long)]
        id: String,
    },
    /// Set a line's quantity (clamped to 1..=99)
    SetQuantity {
        /// Cart line id
        #[arg(short, long)]
        id: String,

        /// Requested quantity
        #[arg(short, long)]
        quantity: f64,
    },
    /// Empty the cart
    Clear,
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut store = CartStore::open(JsonFileStore::new(cli.file));

    match cli.command {
        Commands::Show => {}
        Commands::Add {
            id,
            name,
            price,
            image_url,
        } => {
            let mut product = Product::with_f64_price(id, name, price);
            product.image_url = image_url;
            store.add(&product);
        }
        Commands::Remove { id } => store.remove(&id),
        Commands::SetQuantity { id, quantity } => store.update_quantity(&id, quantity),
        Commands::Clear => store.clear(),
    }

    show(&store);
}

/// Print the cart the way the storefront drawer renders it.
fn show(store: &CartStore<JsonFileStore>) {
    if store.state().is_empty() {
        tracing::info!("Cart is empty");
        return;
    }
    for line in store.lines() {
        tracing::info!(
            "{} x{:<2} {:>10}  ({} each)",
            line.name,
            line.quantity,
            format_price_sek(line.subtotal()),
            format_price_sek(line.price),
        );
    }
    tracing::info!("Total: {}", format_price_sek(store.total()));
}
