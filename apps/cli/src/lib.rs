//! # Rocket Shoes CLI Library
//!
//! Wires the cart store together and runs one command per invocation.
//!
//! ## Module Organization
//! ```text
//! rocketshoes_cli/
//! ├── main.rs     ◄─── argument parsing, runtime
//! └── lib.rs      ◄─── You are here (setup, commands, rendering)
//! ```
//!
//! ## Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartConfig::load(--config)                                             │
//! │       │                                                                 │
//! │       ├── --fixture db.json ? FixtureCatalog : HttpCatalog(api)         │
//! │       ├── --storage path    ? FileStore(path) : FileStore(data dir)     │
//! │       └── ChannelNotifier ──► printed after the command                │
//! │                                                                         │
//! │  CartStore::open(catalog, CartRepository(store, namespace), notifier)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rocketshoes_cart::{
    CartConfig, CartRepository, CartStore, Catalog, ChannelNotifier, FileStore, FixtureCatalog,
    HttpCatalog, MemoryStore,
};
use rocketshoes_core::{Cart, Notification, ProductId, UpdateProductAmount};

#[derive(Debug, Parser)]
#[command(name = "rocketshoes")]
#[command(about = "Manage the Rocket Shoes shopping cart")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage file holding the cart (overrides config)
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Serve the catalog from a json-server db file instead of the API
    #[arg(long, global = true)]
    pub fixture: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the cart
    Show,

    /// Add one unit of a product
    Add { product_id: ProductId },

    /// Remove a product from the cart
    Remove { product_id: ProductId },

    /// Set the amount of a product in the cart
    Update {
        product_id: ProductId,
        #[arg(allow_negative_numbers = true)]
        amount: i32,
    },
}

/// Initializes the tracing subscriber (logs go to stderr).
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rocketshoes=trace` - Trace the rocketshoes crates only
/// - Default: WARN, INFO for rocketshoes crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,rocketshoes=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one CLI invocation, printing to stdout.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = CartConfig::load(cli.config.clone()).context("loading configuration")?;
    if let Some(path) = cli.storage.clone() {
        config.storage.path = Some(path);
    }

    let catalog = build_catalog(&config, cli.fixture.as_deref())?;
    let (notifier, notices) = ChannelNotifier::new();
    let repository = build_repository(&config);
    let store = CartStore::open(catalog, repository, Arc::new(notifier));

    let stdout = std::io::stdout();
    execute(&store, cli.command, notices, &mut stdout.lock()).await
}

fn build_catalog(config: &CartConfig, fixture: Option<&std::path::Path>) -> Result<Arc<dyn Catalog>> {
    match fixture {
        Some(path) => Ok(Arc::new(
            FixtureCatalog::from_path(path).context("loading fixture catalog")?,
        )),
        None => {
            info!(base_url = %config.api.base_url, "Using HTTP catalog");
            Ok(Arc::new(
                HttpCatalog::from_settings(&config.api).context("building HTTP client")?,
            ))
        }
    }
}

fn build_repository(config: &CartConfig) -> CartRepository {
    let namespace = &config.storage.namespace;
    match config.storage.resolved_path() {
        Some(path) => {
            info!(?path, "Using file storage");
            CartRepository::new(FileStore::new(path), namespace)
        }
        None => {
            warn!("No data directory available, cart will not outlive this run");
            CartRepository::new(MemoryStore::new(), namespace)
        }
    }
}

/// Runs `command` against `store` and writes notices and the cart to `out`.
pub async fn execute(
    store: &CartStore,
    command: Command,
    mut notices: UnboundedReceiver<Notification>,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Show => {}
        Command::Add { product_id } => store.add_product(product_id).await,
        Command::Remove { product_id } => store.remove_product(product_id).await,
        Command::Update { product_id, amount } => {
            store
                .update_product_amount(UpdateProductAmount { product_id, amount })
                .await
        }
    }

    while let Ok(notification) = notices.try_recv() {
        writeln!(out, "! {}", notification.message)?;
    }

    render_cart(&store.cart(), out)?;
    Ok(())
}

/// Prints the cart as a table followed by its totals.
pub fn render_cart(cart: &Cart, out: &mut dyn Write) -> std::io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Cart is empty");
    }

    writeln!(out, "{:>4}  {:<40} {:>6} {:>14} {:>14}", "ID", "PRODUCT", "QTY", "PRICE", "SUBTOTAL")?;
    for item in cart.items() {
        writeln!(
            out,
            "{:>4}  {:<40} {:>6} {:>14} {:>14}",
            item.id,
            item.title,
            item.amount,
            item.price.to_string(),
            item.subtotal().to_string()
        )?;
    }

    let totals = cart.totals();
    writeln!(
        out,
        "{} item(s), {} unit(s), total {}",
        totals.item_count, totals.total_quantity, totals.total
    )
}
