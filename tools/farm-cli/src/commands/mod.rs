//! CLI command implementations.

pub mod cart;
pub mod config;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use farm_commerce::ids::{AddressId, ProductId};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart entries and totals.
    Show,
    /// Add a product to the cart.
    Add(AddArgs),
    /// Remove a product from the cart.
    Remove {
        /// Product ID.
        id: ProductId,
    },
    /// Set a product's quantity; zero or less removes it.
    Update {
        /// Product ID.
        id: ProductId,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every entry.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the order creation payload for the cart.
    Order(OrderArgs),
}

/// Arguments for `cart add`.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    #[arg(long, required_unless_present = "record")]
    pub id: Option<u64>,

    /// Product name.
    #[arg(long)]
    pub name: Option<String>,

    /// Unit price in rupiah.
    #[arg(long, required_unless_present = "record")]
    pub price: Option<f64>,

    /// Product category.
    #[arg(long)]
    pub category: Option<String>,

    /// Image path or absolute URL.
    #[arg(long)]
    pub image_url: Option<String>,

    /// Full product record as JSON, in either field casing.
    #[arg(long, conflicts_with_all = ["id", "name", "price", "category", "image_url"])]
    pub record: Option<String>,

    /// Units to add.
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for `cart order`.
#[derive(Args)]
pub struct OrderArgs {
    /// Delivery address ID.
    #[arg(long)]
    pub address_id: Option<AddressId>,

    /// JSON file with the user's saved addresses; the default one is used
    /// when no address ID is given.
    #[arg(long, conflicts_with = "address_id")]
    pub addresses: Option<PathBuf>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
