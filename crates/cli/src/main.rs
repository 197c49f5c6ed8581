//! Mercado CLI - Database, catalog and cart tools.
//!
//! # Usage
//!
//! ```bash
//! # Run catalog database migrations
//! mercado migrate
//!
//! # Insert products from a YAML file
//! mercado seed products.yaml
//!
//! # Browse the catalog
//! mercado catalog
//! mercado product show 3
//!
//! # Administer products
//! mercado product create --nombre "Cuaderno A4" --precio 12.5
//! mercado product update 3 --stock 10
//! mercado product delete 3
//! mercado upload ./foto.png
//!
//! # Cart
//! mercado cart add 3
//! mercado cart show
//! mercado cart checkout
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mercado_core::ProductId;

mod commands;

use commands::product::ProductFields;

#[derive(Parser)]
#[command(name = "mercado")]
#[command(author, version, about = "Mercado catalog CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert products from a YAML file
    Seed {
        /// Path to the YAML file
        file: String,
    },
    /// Render the catalog grid
    Catalog,
    /// Show and manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Upload a product image
    Upload {
        /// Path to the image file
        path: PathBuf,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Render a product's detail view
    Show {
        /// Product ID
        id: Option<String>,
    },
    /// Create a product
    Create {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Update the given fields of a product
    Update {
        /// Product ID
        id: ProductId,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: ProductId,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add { id: ProductId },
    /// Remove every unit of a product
    Remove { id: ProductId },
    /// Empty the cart
    Clear,
    /// Print the number of entries
    Count,
    /// Render the cart
    Show,
    /// Simulated checkout (empties the cart)
    Checkout,
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mercado_cli=info,mercado_server=info,mercado_storefront=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file } => commands::seed::products(&file).await?,
        Commands::Catalog => commands::catalog::show().await?,
        Commands::Product { action } => match action {
            ProductAction::Show { id } => commands::product::show(id.as_deref()).await?,
            ProductAction::Create { fields } => commands::product::create(fields).await?,
            ProductAction::Update { id, fields } => commands::product::update(id, fields).await?,
            ProductAction::Delete { id } => commands::product::delete(id).await?,
        },
        Commands::Upload { path } => commands::upload::run(&path).await?,
        Commands::Cart { action } => match action {
            CartAction::Add { id } => commands::cart::add(id)?,
            CartAction::Remove { id } => commands::cart::remove(id)?,
            CartAction::Clear => commands::cart::clear()?,
            CartAction::Count => commands::cart::count()?,
            CartAction::Show => commands::cart::show().await?,
            CartAction::Checkout => commands::cart::checkout().await?,
        },
    }
    Ok(())
}
