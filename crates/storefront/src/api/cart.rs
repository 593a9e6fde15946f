//! Cart endpoints.
//!
//! Mutations answer with `{"detail": ..., "cart": ...}`; the embedded cart is
//! the server's authoritative state after the change. Updating a line to a
//! quantity of 0 removes it.

use serde::Serialize;
use tracing::instrument;

use tienda_core::{Cart, CartItemId, CartMutation, ProductId};

use super::Storefront;
use crate::error::ApiError;

/// Quantity used when adding a product without an explicit count.
pub const DEFAULT_QTY: u32 = 1;

#[derive(Serialize)]
struct AddItemBody {
    product_id: ProductId,
    qty: u32,
}

#[derive(Serialize)]
struct UpdateItemBody {
    qty: u32,
}

impl Storefront {
    /// `GET /api/cart/` - the session's cart (created on first access).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_cart(&self) -> Result<Cart, ApiError> {
        self.client.get("/api/cart/").await
    }

    /// `POST /api/cart/items/` - add `qty` of a product.
    ///
    /// Adding a product already in the cart increases that line's quantity.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if priming or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_cart(
        &self,
        product_id: ProductId,
        qty: u32,
    ) -> Result<CartMutation, ApiError> {
        self.prime_csrf().await?;
        self.client
            .post("/api/cart/items/", &AddItemBody { product_id, qty })
            .await
    }

    /// `PATCH /api/cart/items/{id}/` - set a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if priming or the request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn update_cart_item(
        &self,
        item_id: CartItemId,
        qty: u32,
    ) -> Result<CartMutation, ApiError> {
        self.prime_csrf().await?;
        self.client
            .patch(
                &format!("/api/cart/items/{item_id}/"),
                &UpdateItemBody { qty },
            )
            .await
    }

    /// `DELETE /api/cart/items/{id}/delete/` - remove a line.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if priming or the request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove_cart_item(&self, item_id: CartItemId) -> Result<CartMutation, ApiError> {
        self.prime_csrf().await?;
        self.client
            .delete(&format!("/api/cart/items/{item_id}/delete/"))
            .await
    }
}
