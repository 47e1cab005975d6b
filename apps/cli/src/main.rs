//! # Rocket Shoes CLI Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logging)
//! 3. Load configuration
//! 4. Open the cart store
//! 5. Run the requested command and print the cart

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = rocketshoes_cli::Cli::parse();

    // The actual setup is in lib.rs so it can be tested
    rocketshoes_cli::init_tracing();
    rocketshoes_cli::run(cli).await
}
