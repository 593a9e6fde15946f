//! Catalog endpoints.

use tracing::{debug, instrument};

use tienda_core::Product;

use super::Storefront;
use crate::error::ApiError;

impl Storefront {
    /// `GET /api/products/` - all active products.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let products: Vec<Product> = self.client.get("/api/products/").await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }
}
