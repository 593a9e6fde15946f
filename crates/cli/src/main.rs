//! Tienda CLI - command-line client for the storefront and admin APIs.
//!
//! # Usage
//!
//! ```bash
//! # Check the backend is up
//! tienda ping
//!
//! # Browse the catalog
//! tienda products
//!
//! # Cookies are not kept between invocations, so a cart only carries over
//! # when it belongs to a logged-in user
//! TIENDA_PASSWORD=... tienda -u ana cart add 7 --qty 2
//! TIENDA_PASSWORD=... tienda -u ana cart show
//!
//! # Staff operations log in first
//! TIENDA_PASSWORD=... tienda -u admin admin orders status 12 paid
//! ```
//!
//! # Environment Variables
//!
//! - `TIENDA_API_URL` - Backend origin (required)
//! - `TIENDA_USERNAME` - Default for `--username`
//! - `TIENDA_PASSWORD` - Password used with `--username`
//! - `RUST_LOG` - Log filter (default: `info`); logs go to stderr
//!
//! Command results are printed to stdout as pretty JSON.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tienda_core::{CartItemId, Decimal, Email, OrderId, OrderStatus, ProductId, ProductImageId};

mod commands;

#[derive(Parser)]
#[command(name = "tienda")]
#[command(author, version, about = "Tienda storefront API client")]
struct Cli {
    /// Log in as this user before running the command (password from `TIENDA_PASSWORD`)
    #[arg(short, long, global = true, env = "TIENDA_USERNAME")]
    username: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the backend is reachable
    Ping,
    /// Show the user the session belongs to
    Me,
    /// List active products
    Products,
    /// Inspect or change the cart
    ///
    /// Each invocation starts a new session, so a guest cart is gone by the
    /// next command. Pass `--username` to work on a user's saved cart.
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Review and place an order
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
    /// Staff-only product and order management
    Admin {
        #[command(subcommand)]
        area: AdminArea,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart with its item count and total
    Show,
    /// Add a product
    Add {
        /// Product ID
        product: ProductId,

        /// Quantity to add
        #[arg(short, long, default_value_t = tienda_storefront::api::cart::DEFAULT_QTY)]
        qty: u32,
    },
    /// Set a line's quantity (0 removes it)
    Update {
        /// Cart item ID
        item: CartItemId,
        /// New quantity
        qty: u32,
    },
    /// Remove a line
    Remove {
        /// Cart item ID
        item: CartItemId,
    },
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Show the cart with shipping applied
    Summary,
    /// Turn the cart into an order
    Confirm {
        #[arg(long)]
        email: Email,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
enum AdminArea {
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products, including inactive ones
    List,
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        slug: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long, default_value_t = 0)]
        stock: u32,
        /// Create the product hidden from the storefront
        #[arg(long)]
        inactive: bool,
    },
    /// Update some fields of a product
    Patch {
        /// Product ID
        id: ProductId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        stock: Option<u32>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Replace a product's main image
    UploadMain {
        /// Product ID
        id: ProductId,
        /// Image file
        path: PathBuf,
    },
    /// Add an image to a product's gallery
    UploadGallery {
        /// Product ID
        id: ProductId,
        /// Image file
        path: PathBuf,
    },
    /// Delete a gallery image
    DeleteImage {
        /// Gallery image ID
        image: ProductImageId,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List all orders
    List,
    /// Change an order's status
    Status {
        /// Order ID
        id: OrderId,
        /// New status (`pending`, `paid`, `cancelled`)
        status: OrderStatus,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.json_logs);

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr so stdout carries only command output.
fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let session = commands::session::connect(cli.username.as_deref()).await?;

    match cli.command {
        Commands::Ping => commands::shop::ping(&session).await,
        Commands::Me => commands::shop::me(&session).await,
        Commands::Products => commands::shop::products(&session).await,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&session).await,
            CartAction::Add { product, qty } => commands::cart::add(&session, product, qty).await,
            CartAction::Update { item, qty } => commands::cart::update(&session, item, qty).await,
            CartAction::Remove { item } => commands::cart::remove(&session, item).await,
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Summary => commands::shop::checkout_summary(&session).await,
            CheckoutAction::Confirm {
                email,
                full_name,
                address,
                city,
                phone,
                region,
                notes,
            } => {
                let mut request =
                    tienda_core::CheckoutRequest::new(email, full_name, address, city);
                request.phone = phone;
                request.region = region;
                request.notes = notes;
                commands::shop::checkout_confirm(&session, &request).await
            }
        },
        Commands::Admin { area } => match area {
            AdminArea::Products { action } => match action {
                ProductAction::List => commands::admin::list_products(&session).await,
                ProductAction::Create {
                    name,
                    slug,
                    price,
                    stock,
                    inactive,
                } => {
                    let product = tienda_core::NewProduct {
                        name,
                        slug,
                        price,
                        stock,
                        is_active: !inactive,
                    };
                    commands::admin::create_product(&session, &product).await
                }
                ProductAction::Patch {
                    id,
                    name,
                    slug,
                    price,
                    stock,
                    active,
                } => {
                    let patch = tienda_core::ProductPatch {
                        name,
                        slug,
                        price,
                        stock,
                        is_active: active,
                    };
                    commands::admin::patch_product(&session, id, &patch).await
                }
                ProductAction::UploadMain { id, path } => {
                    commands::admin::upload_main(&session, id, &path).await
                }
                ProductAction::UploadGallery { id, path } => {
                    commands::admin::upload_gallery(&session, id, &path).await
                }
                ProductAction::DeleteImage { image } => {
                    commands::admin::delete_image(&session, image).await
                }
            },
            AdminArea::Orders { action } => match action {
                OrderAction::List => commands::admin::list_orders(&session).await,
                OrderAction::Status { id, status } => {
                    commands::admin::update_order_status(&session, id, status).await
                }
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cart_help_points_guests_at_username() {
        let command = Cli::command();
        let cart = command.find_subcommand("cart").expect("cart subcommand");
        let help = cart.get_long_about().expect("long help").to_string();

        assert!(help.contains("new session"));
        assert!(help.contains("--username"));
    }

    #[test]
    fn test_parses_cart_add_with_default_qty() {
        let cli = Cli::try_parse_from(["tienda", "cart", "add", "7"]).expect("parse");

        assert!(matches!(
            cli.command,
            Commands::Cart {
                action: CartAction::Add { product, qty: 1 }
            } if product == ProductId::new(7)
        ));
    }
}
