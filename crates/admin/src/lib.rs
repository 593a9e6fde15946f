//! Tienda Admin - staff-only API bindings.
//!
//! # Security
//!
//! Every endpoint here requires a session belonging to a staff user. The
//! backend enforces that; this crate only issues the calls, so log in through
//! [`Storefront::login`](tienda_storefront::Storefront::login) on the same
//! [`ApiClient`] first.
//!
//! # Modules
//!
//! - [`products`] - list, create and patch products
//! - [`media`] - main image and gallery uploads
//! - [`orders`] - list orders and change their status
//!
//! Mutating calls send the current `X-CSRFToken` without priming it; the
//! login that established the staff session already set the cookie.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod media;
pub mod orders;
pub mod products;

pub use media::ImageUpload;

use tienda_storefront::{ApiClient, ApiError, ClientConfig};

/// Admin API for the Tienda backend.
#[derive(Debug, Clone)]
pub struct AdminClient {
    client: ApiClient,
}

impl AdminClient {
    /// Wrap an existing client, sharing its session cookies.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(ApiClient::new(config)?))
    }

    /// The underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }
}
