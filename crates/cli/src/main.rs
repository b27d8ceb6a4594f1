//! Fishmarket CLI - manage the locally persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Add two kilograms of cod fillet
//! fm-cart add --id cod-1 --species "Atlantic cod" --form fillet \
//!     --price 12.5 --quantity 2 --seller "Harbor Fish Co." --available 40
//!
//! # Change or drop a line (0 removes it)
//! fm-cart update cod-1 3
//! fm-cart remove cod-1
//!
//! # Inspect
//! fm-cart show
//! fm-cart show --json
//! fm-cart total
//!
//! # Print the order summary and empty the cart
//! fm-cart checkout
//! ```
//!
//! # Commands
//!
//! - `add` - Add a line, merging with an existing line of the same id
//! - `update` - Set a line's quantity
//! - `remove` - Remove a line
//! - `clear` - Empty the cart
//! - `show` - List lines with count and total
//! - `total` - Print the total price
//! - `checkout` - Print the order summary as JSON and clear the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fishmarket_cart::CartConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "fm-cart")]
#[command(author, version, about = "Fishmarket cart tools")]
struct Cli {
    /// Directory holding the cart snapshot (overrides `FISHMARKET_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage key of the snapshot (overrides `FISHMARKET_CART_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add an item to the cart
    Add {
        /// Product identifier
        #[arg(long)]
        id: String,

        /// Fish species
        #[arg(long)]
        species: String,

        /// Form or preparation
        #[arg(long)]
        form: String,

        /// Unit price per kilogram
        #[arg(long)]
        price: f64,

        /// Quantity to add
        #[arg(long, default_value_t = 1.0)]
        quantity: f64,

        /// Seller display name
        #[arg(long)]
        seller: String,

        /// Quantity the seller has on hand
        #[arg(long)]
        available: f64,
    },
    /// Set the quantity of an item (0 or less removes it)
    Update {
        /// Product identifier
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: f64,
    },
    /// Remove an item from the cart
    Remove {
        /// Product identifier
        id: String,
    },
    /// Remove every item
    Clear,
    /// Show the cart contents
    Show {
        /// Print the raw snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the total price
    Total,
    /// Print the order summary and clear the cart
    Checkout,
}

/// Initialize tracing on stderr so command output on stdout stays clean.
fn init_tracing(json: bool) {
    // Defaults to warn for the library if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fishmarket_cart=warn,fm_cart=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    let cli = Cli::parse();

    let mut config = match CartConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false);
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    init_tracing(config.log_json);

    if let Err(e) = cli.key.map_or(Ok(()), |key| config.set_cart_key(key)) {
        tracing::error!("Invalid --key: {e}");
        std::process::exit(1);
    }

    let mut store = config.open_store();
    let mut out = std::io::stdout().lock();

    if let Err(e) = commands::cart::run(cli.command, &mut store, &mut out) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}
