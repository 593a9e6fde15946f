//! Tienda Storefront - customer-facing API bindings.
//!
//! # Architecture
//!
//! - [`http::ApiClient`] owns the `reqwest` client and the cookie jar. Every
//!   request goes through it, so session cookies and the `X-CSRFToken` header
//!   are handled in one place.
//! - [`Storefront`] maps each backend endpoint (auth, catalog, cart,
//!   checkout) to one async method.
//! - [`store::CartStore`] caches the server's cart and publishes it to
//!   subscribers through a `tokio::sync::watch` channel.
//!
//! The backend is the source of truth: nothing here computes cart state, and
//! a failed call leaves local state untouched.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use tienda_core::ProductId;
//! use tienda_storefront::{ClientConfig, Storefront, store::CartStore};
//!
//! let config = ClientConfig::from_env()?;
//! let storefront = Storefront::from_config(&config)?;
//!
//! let cart = CartStore::new(storefront);
//! cart.load().await?;
//! cart.add(ProductId::new(7), 2).await?;
//! println!("{} items, total {}", cart.count(), cart.total());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use api::{Registration, Storefront};
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::ApiClient;
