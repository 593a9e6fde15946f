//! Product management endpoints.

use tracing::{info, instrument};

use tienda_core::{NewProduct, Product, ProductId, ProductPatch};
use tienda_storefront::ApiError;

use super::AdminClient;

impl AdminClient {
    /// `GET /api/admin/products/` - every product, newest first, including
    /// inactive ones and their images.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.client.get("/api/admin/products/").await
    }

    /// `POST /api/admin/products/` - create a product.
    ///
    /// The payload is validated first; an invalid one is never sent.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an invalid payload, otherwise
    /// `ApiError` if the request fails.
    #[instrument(skip(self, product), fields(slug = %product.slug))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        product.validate()?;

        let created: Product = self.client.post("/api/admin/products/", product).await?;
        info!(product_id = %created.id, "Product created");
        Ok(created)
    }

    /// `PATCH /api/admin/products/{id}/` - update the fields set in `patch`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an empty or invalid patch, otherwise
    /// `ApiError` if the request fails.
    #[instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn patch_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, ApiError> {
        patch.validate()?;

        self.client
            .patch(&format!("/api/admin/products/{id}/"), patch)
            .await
    }
}
