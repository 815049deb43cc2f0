//! Kiosk CLI - drives the commerce engine from a terminal.
//!
//! The CLI plays the part the UI plays in production: it constructs the
//! cart store over the file-backed adapter, keeps a badge subscriber on
//! the event bus, and blocks on each engine call.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! kiosk products
//!
//! # Work the cart
//! kiosk cart show
//! kiosk cart add 7
//! kiosk cart set-quantity 7 3
//! kiosk cart remove 7
//! kiosk cart clear
//!
//! # Submit the cart as an order
//! kiosk checkout --name "Mira" --address "12 Hill Lane" --email mira@example.com
//!
//! # Admin: review and decide
//! kiosk admin orders
//! kiosk admin approve 31 32
//! kiosk admin deny 33
//! ```
//!
//! # Environment Variables
//!
//! - `KIOSK_API_URL` - Base URL of the remote order/catalog authority
//! - `KIOSK_API_TOKEN` - Opaque bearer credential (optional)
//! - `KIOSK_DATA_DIR` - Cart persistence directory (default: `.kiosk`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kiosk")]
#[command(author, version, about = "Kiosk commerce engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Products,
    /// Inspect and mutate the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Submit the current cart as an order
    Checkout {
        /// Customer name
        #[arg(short, long)]
        name: String,

        /// Delivery address
        #[arg(short, long)]
        address: String,

        /// Customer email (optional)
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Admin order management
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart lines and total
    Show,
    /// Add a catalog product by id (increments quantity if present)
    Add {
        /// Numeric product id
        product_id: String,
    },
    /// Set the quantity of a cart line
    SetQuantity {
        /// Numeric product id
        product_id: String,
        /// New quantity (>= 1; use `remove` to delete)
        quantity: u32,
    },
    /// Remove a cart line
    Remove {
        /// Numeric product id
        product_id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AdminAction {
    /// List orders awaiting approval and already resolved
    Orders,
    /// Approve the given orders
    Approve {
        /// Order ids
        order_ids: Vec<String>,
    },
    /// Deny the given orders
    Deny {
        /// Order ids
        order_ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products => commands::products::list().await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Add { product_id } => commands::cart::add(&product_id).await?,
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => commands::cart::set_quantity(&product_id, quantity)?,
            CartAction::Remove { product_id } => commands::cart::remove(&product_id)?,
            CartAction::Clear => commands::cart::clear()?,
        },
        Commands::Checkout {
            name,
            address,
            email,
        } => commands::checkout::submit(&name, &address, email.as_deref()).await?,
        Commands::Admin { action } => match action {
            AdminAction::Orders => commands::admin::orders().await?,
            AdminAction::Approve { order_ids } => {
                commands::admin::transition(&order_ids, kiosk_core::OrderAction::Approve).await?;
            }
            AdminAction::Deny { order_ids } => {
                commands::admin::transition(&order_ids, kiosk_core::OrderAction::Deny).await?;
            }
        },
    }
    Ok(())
}
