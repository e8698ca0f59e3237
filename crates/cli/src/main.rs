//! GrindCTRL CLI - Engine smoke-test and inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the loaded catalog
//! gc-cli catalog
//!
//! # List recorded orders, optionally filtered by contact details
//! gc-cli orders --phone "+201005550199"
//!
//! # Drive a full scripted checkout against the configured webhooks
//! gc-cli checkout --email sara@example.com --phone "+201005550199"
//! ```
//!
//! # Commands
//!
//! - `catalog` - Print the catalog the engine would load
//! - `orders` - List the persisted order history
//! - `checkout` - Add the first catalog product to the cart and place an order

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gc-cli")]
#[command(author, version, about = "GrindCTRL storefront engine tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the catalog the engine would load
    Catalog,
    /// List the persisted order history
    Orders {
        /// Filter by phone number (digit-insensitive match)
        #[arg(short, long)]
        phone: Option<String>,

        /// Filter by customer email (case-insensitive match)
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Drive a scripted checkout and place an order
    Checkout {
        /// Customer email address
        #[arg(long, default_value = "sara@example.com")]
        email: String,

        /// Customer phone number
        #[arg(long, default_value = "+201005550199")]
        phone: String,

        /// Quantity of the first catalog product to order
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
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
        Commands::Catalog => commands::catalog()?,
        Commands::Orders { phone, email } => commands::orders(phone, email)?,
        Commands::Checkout {
            email,
            phone,
            quantity,
        } => commands::checkout(&email, &phone, quantity).await?,
    }
    Ok(())
}
