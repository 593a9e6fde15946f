//! Order management endpoints.

use serde::Serialize;
use tracing::{info, instrument};

use tienda_core::{Order, OrderId, OrderStatus};
use tienda_storefront::ApiError;

use super::AdminClient;

#[derive(Serialize)]
struct StatusBody {
    status: OrderStatus,
}

impl AdminClient {
    /// `GET /api/admin/orders/` - every order, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.client.get("/api/admin/orders/").await
    }

    /// `PATCH /api/admin/orders/{id}/status/` - move an order to `status`.
    ///
    /// Any transition between the three statuses is accepted by the backend.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let order: Order = self
            .client
            .patch(
                &format!("/api/admin/orders/{id}/status/"),
                &StatusBody { status },
            )
            .await?;

        info!(order = %order.number, status = %order.status, "Order status updated");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_body() {
        let body = StatusBody {
            status: OrderStatus::Paid,
        };
        assert_eq!(
            serde_json::to_string(&body).expect("serialize"),
            r#"{"status":"paid"}"#
        );
    }
}
