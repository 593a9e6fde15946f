//! Checkout endpoints.

use tracing::{info, instrument};

use tienda_core::{CheckoutConfirmation, CheckoutRequest, CheckoutSummary};

use super::Storefront;
use crate::error::ApiError;

impl Storefront {
    /// `GET /api/checkout/summary/` - the cart with shipping applied.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn checkout_summary(&self) -> Result<CheckoutSummary, ApiError> {
        self.client.get("/api/checkout/summary/").await
    }

    /// `POST /api/checkout/confirm/` - turn the cart into an order.
    ///
    /// The backend empties the cart on success, so a cart store should be
    /// reloaded afterwards. Stock and empty-cart failures come back as
    /// `RequestFailed` bodies (`no_stock`, `empty_cart`, `missing:<field>`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if priming or the request fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn confirm_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutConfirmation, ApiError> {
        self.prime_csrf().await?;
        let confirmation: CheckoutConfirmation =
            self.client.post("/api/checkout/confirm/", request).await?;

        info!(
            order = %confirmation.order.number,
            total = %confirmation.order.total,
            "Order created"
        );
        Ok(confirmation)
    }
}
