//! Verde CLI - catalog checks and persisted state tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate a catalog file
//! verde-cli catalog validate crates/storefront/data/products.json
//!
//! # List the sale scope, cheapest first
//! verde-cli catalog list crates/storefront/data/products.json --scope sale --sort price-low-high
//!
//! # Inspect or reset the persisted shopper state
//! verde-cli state show .verde-state
//! verde-cli state clear .verde-state
//! ```
//!
//! # Commands
//!
//! - `catalog validate` - Report duplicate IDs/slugs, empty options, bad prices
//! - `catalog list` - Print a filtered, sorted listing
//! - `state show` - Print the persisted cart and wishlist
//! - `state clear` - Reset the persisted shopper (and optionally admin) state

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use verde_core::catalog::SortOrder;

mod commands;

#[derive(Parser)]
#[command(name = "verde-cli")]
#[command(author, version, about = "Verde Fashion CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a product catalog file
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect or reset persisted storefront state
    State {
        #[command(subcommand)]
        action: StateAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Check a catalog file for problems
    Validate {
        /// Path to the catalog JSON
        path: PathBuf,
    },
    /// Print a shop listing
    List {
        /// Path to the catalog JSON
        path: PathBuf,

        /// Listing scope (`all`, `women`, `men`, `accessories`, `new-arrivals`, `sale`)
        #[arg(long, default_value = "all")]
        scope: String,

        /// Sort order (`featured`, `price-low-high`, `price-high-low`, `rating`, `newest`)
        #[arg(long, default_value = "featured")]
        sort: SortOrder,
    },
}

#[derive(Subcommand)]
enum StateAction {
    /// Print the persisted cart and wishlist
    Show {
        /// State directory (as `VERDE_STATE_DIR`)
        dir: PathBuf,
    },
    /// Delete the persisted shopper state
    Clear {
        /// State directory (as `VERDE_STATE_DIR`)
        dir: PathBuf,

        /// Also reset the admin console (login flag and orders)
        #[arg(long)]
        admin: bool,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Validate { path } => commands::catalog::validate(&path)?,
            CatalogAction::List { path, scope, sort } => {
                commands::catalog::list(&path, &scope, sort)?;
            }
        },
        Commands::State { action } => match action {
            StateAction::Show { dir } => commands::state::show(&dir)?,
            StateAction::Clear { dir, admin } => commands::state::clear(&dir, admin)?,
        },
    }
    Ok(())
}
