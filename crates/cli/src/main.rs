//! Fresh Harvest CLI - Remote store seeding and inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Insert the demo product set into the remote store
//! fh-cli seed
//!
//! # Print the most recent orders
//! fh-cli orders list --limit 10
//! ```
//!
//! # Commands
//!
//! - `seed` - Seed the remote store with demo products
//! - `orders list` - Print recent orders with status and total
//!
//! Both commands read `SUPABASE_URL` and `SUPABASE_SERVICE_ROLE_KEY` from
//! the environment (or `.env`), the same variables the admin binary uses.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fh-cli")]
#[command(author, version, about = "Fresh Harvest CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the remote store with demo products
    Seed,
    /// Inspect orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// Print the most recent orders
    List {
        /// Maximum number of orders to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
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
        Commands::Seed => commands::seed::run().await,
        Commands::Orders {
            action: OrdersAction::List { limit },
        } => commands::orders::list(limit).await,
    }
}
