//! Vinea CLI - the device cart and catalog from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! vinea cart show
//!
//! # Add two bottles from the marketplace, or one from a vineyard page
//! vinea cart add 1 --quantity 2
//! vinea cart add 8 --vineyard 1
//!
//! # Step a quantity, remove a line, empty the cart
//! vinea cart update 1 -1
//! vinea cart remove 8
//! vinea cart clear
//!
//! # Place the order
//! vinea cart checkout
//!
//! # Browse the catalog
//! vinea catalog list --region Bordeaux --type Rouge
//! vinea catalog vineyard 1
//! vinea catalog projects --region bordeaux
//! ```
//!
//! The CLI is one device with one cart, kept in the `VINEA_CART_SLOT`
//! slot under `--data-dir`. Storefront browsers each get their own slot
//! named after that one.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vinea_storefront::config::StorefrontConfig;
use vinea_storefront::notice::Locale;

mod commands;

#[derive(Parser)]
#[command(name = "vinea")]
#[command(author, version, about = "Vinea cart and catalog tools")]
struct Cli {
    /// Directory holding persisted slots (overrides `VINEA_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Message language, `fr` or `en` (overrides `STOREFRONT_LOCALE`)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse wines and vineyards
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart panel
    Show,
    /// Add a wine
    Add {
        /// Wine ID
        wine_id: String,

        /// Bottles to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Add from this vineyard's page instead of the marketplace
        #[arg(long)]
        vineyard: Option<String>,
    },
    /// Change a line's quantity by a signed step
    Update {
        /// Wine ID
        wine_id: String,

        /// Step, e.g. 1 or -1
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove a line
    Remove {
        /// Wine ID
        wine_id: String,
    },
    /// Empty the cart
    Clear,
    /// Place the order
    Checkout,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List marketplace wines
    List {
        /// Free text matched against name, description and region
        #[arg(short, long)]
        search: Option<String>,

        /// Region, e.g. Bordeaux
        #[arg(short, long)]
        region: Option<String>,

        /// Wine type, e.g. Rouge
        #[arg(short = 't', long = "type")]
        wine_type: Option<String>,
    },
    /// Show a vineyard and its wines
    Vineyard {
        /// Vineyard ID
        id: String,
    },
    /// List investment projects
    Projects {
        /// Free text matched against title, description and location
        #[arg(short, long)]
        search: Option<String>,

        /// Region key, e.g. bordeaux
        #[arg(short, long)]
        region: Option<String>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vinea_storefront=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    let output = match cli.command {
        Commands::Cart { action } => {
            let ctx = commands::cart::CartContext::open(&config);
            match action {
                CartAction::Show => ctx.show(),
                CartAction::Add {
                    wine_id,
                    quantity,
                    vineyard,
                } => ctx.add(&wine_id, quantity, vineyard)?,
                CartAction::Update { wine_id, delta } => ctx.update(&wine_id, delta),
                CartAction::Remove { wine_id } => ctx.remove(&wine_id),
                CartAction::Clear => ctx.clear(),
                CartAction::Checkout => ctx.checkout()?,
            }
        }
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                search,
                region,
                wine_type,
            } => commands::catalog::list(search, region, wine_type),
            CatalogAction::Vineyard { id } => commands::catalog::vineyard(&id)?,
            CatalogAction::Projects { search, region } => {
                commands::catalog::projects(search, region)
            }
        },
    };

    emit(&output);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn emit(output: &str) {
    println!("{output}");
}
