//! Tote CLI
//!
//! Browse the fixture catalog, manage the persisted wishlist and run a
//! simulated checkout from the command line.

use std::{io, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tote::{pricing::to_money, prelude::*};

/// Tote command line
#[derive(Debug, Parser)]
#[command(name = "tote", about = "Cart and wishlist demo", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: StoreConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List catalog products
    Products {
        /// Only list products in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },

    /// Add products to a fresh cart and check out
    Checkout {
        /// Product ids; repeat an id to buy more than one
        #[arg(required = true)]
        ids: Vec<u64>,
    },
}

#[derive(Debug, Subcommand)]
enum WishlistAction {
    /// Show the wishlist
    List,

    /// Add a product
    Add {
        /// Product id
        id: u64,
    },

    /// Remove a product
    Remove {
        /// Product id
        id: u64,
    },

    /// Add a product if absent, remove it otherwise
    Toggle {
        /// Product id
        id: u64,
    },

    /// Remove every product
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let catalog = FixtureCatalog::from_fixture(cli.config.fixtures.clone(), &cli.config.catalog)?;
    let currency = cli.config.currency_for_catalog(catalog.currency())?;

    info!(
        catalog = %cli.config.catalog,
        products = catalog.len(),
        currency = currency.iso_alpha_code,
        "loaded catalog"
    );

    let storage = Arc::new(FileStore::new(cli.config.data_dir.clone()));
    let mut stores = StoreContext::init(storage, &cli.config).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Products { category } => {
            let products = match category {
                Some(category) => catalog.products_in_category(&category).await?,
                None => catalog.products().await?,
            };

            write_products(&mut out, &products, currency, &stores.wishlist)?;
        }
        Command::Wishlist { action } => {
            run_wishlist(action, &catalog, &mut stores.wishlist).await?;

            write_products(&mut out, stores.wishlist.items(), currency, &stores.wishlist)?;
        }
        Command::Checkout { ids } => {
            add_from_catalog(&mut stores.cart, &catalog, ids.into_iter().map(ProductId)).await?;

            checkout(&mut stores.cart)?.write_to(&mut out)?;
        }
    }

    stores.flush().await;

    Ok(())
}

async fn run_wishlist(
    action: WishlistAction,
    catalog: &FixtureCatalog,
    wishlist: &mut Wishlist,
) -> Result<()> {
    match action {
        WishlistAction::List => {}
        WishlistAction::Add { id } => {
            wishlist.add_item(&catalog.product(ProductId(id)).await?);
        }
        WishlistAction::Remove { id } => {
            wishlist.remove_item(ProductId(id));
        }
        WishlistAction::Toggle { id } => {
            let added = wishlist.toggle(&catalog.product(ProductId(id)).await?);

            info!(product_id = id, added, "toggled wishlist entry");
        }
        WishlistAction::Clear => wishlist.clear(),
    }

    Ok(())
}

fn write_products(
    out: &mut impl io::Write,
    products: &[Product],
    currency: &'static Currency,
    wishlist: &Wishlist,
) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Title", "Category", "Price", "Rating", "♥"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.title.clone(),
            product.category.clone(),
            format!("{}", to_money(product.price, currency)),
            format!("{:.1} ({})", product.rating.rate, product.rating.count),
            if wishlist.is_in_wishlist(product.id) {
                "♥".to_string()
            } else {
                String::new()
            },
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());

    writeln!(out, "{table}")
}
