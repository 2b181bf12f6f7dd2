//! Dewdrop CLI - drive the storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a product to the cart, with extra fields
//! dewdrop cart add serum-01 --field name="Vitamin C Serum" --field price=30
//!
//! # Show the cart and its item count
//! dewdrop cart show
//! dewdrop cart count
//!
//! # Browse the catalog
//! dewdrop products --category serums --sort price-low
//!
//! # Hand a query to the next `products` run
//! dewdrop search "vitamin c"
//!
//! # Switch between light and dark
//! dewdrop theme toggle
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, remove, show, count, or clear cart items
//! - `theme` - Show or toggle the colour theme
//! - `products` - List catalog products with filters and sorting
//! - `search` - Save a search for the products listing

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use commands::CommandResult;
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "dewdrop")]
#[command(author, version, about = "Dewdrop storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show or switch the colour theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// List catalog products
    Products {
        /// Category to show (`all` for every category)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Skin type tag to match (`all` for every skin type)
        #[arg(long, default_value = "all")]
        skin: String,

        /// Search text matched against product names
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order (`price-low`, `price-high`, `name`, `rating`)
        #[arg(long, default_value = "")]
        sort: String,
    },
    /// Save a search for the next products listing
    Search {
        /// Search query
        query: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add {
        /// Product id
        id: String,

        /// Extra product field as `key=value` (JSON values are parsed)
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Remove a product entirely
    Remove {
        /// Product id
        id: String,
    },
    /// List cart items
    Show,
    /// Print the total item count
    Count,
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

/// Parse a `key=value` field. Values that are valid JSON keep their type;
/// anything else is a string.
fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    if key.is_empty() {
        return Err(format!("empty field name in {raw:?}"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Log filter used when `RUST_LOG` is unset. The binary's own events are
/// logged under its crate name.
const DEFAULT_LOG_FILTER: &str =
    concat!(env!("CARGO_CRATE_NAME"), "=info,dewdrop_storefront=info");

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let session = commands::Session::open()?;
    let mut out = std::io::stdout().lock();
    execute(cli.command, &session, &mut out)
}

/// Run one command against `session`, writing its results to `out`.
fn execute(command: Commands, session: &commands::Session, out: &mut dyn Write) -> CommandResult {
    match command {
        Commands::Cart { action } => match action {
            CartAction::Add { id, fields } => commands::cart::add(session, out, &id, fields),
            CartAction::Remove { id } => commands::cart::remove(session, out, &id),
            CartAction::Show => commands::cart::show(session, out),
            CartAction::Count => commands::cart::count(session, out),
            CartAction::Clear => commands::cart::clear(session, out),
        },
        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::theme::show(session, out),
            ThemeAction::Toggle => commands::theme::toggle(session, out),
        },
        Commands::Products {
            category,
            skin,
            search,
            sort,
        } => commands::products::list(session, out, category, skin, search, &sort),
        Commands::Search { query } => commands::search::submit(session, out, &query),
    }
}
