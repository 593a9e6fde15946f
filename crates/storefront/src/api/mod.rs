//! Customer-facing endpoint bindings.
//!
//! One async method per backend endpoint, grouped by area:
//! - [`auth`] - CSRF priming, ping, current user, login/logout/register
//! - [`catalog`] - product listing
//! - [`cart`] - cart reads and mutations
//! - [`checkout`] - checkout summary and confirmation
//!
//! Calls that change server state first *prime* the CSRF cookie with
//! `GET /api/csrf/` (except logout, which reuses the current token), so the
//! token they send is always one the backend just issued.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;

pub use auth::Registration;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::ApiClient;

/// Customer API for the Tienda backend.
#[derive(Debug, Clone)]
pub struct Storefront {
    client: ApiClient,
}

impl Storefront {
    /// Wrap an existing client (e.g. one shared with the admin bindings).
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

    /// Fetch a fresh CSRF cookie before a state-changing call.
    async fn prime_csrf(&self) -> Result<(), ApiError> {
        self.ensure_csrf().await.map(drop)
    }
}
