//! Orders and the checkout payload that creates them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::{OrderId, OrderItemId, ProductId};
use super::status::OrderStatus;

/// An order created from a cart at checkout.
///
/// Optional contact fields come back as empty strings when they were not
/// supplied at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing number, e.g. `ORD-20250903-0001`.
    pub number: String,
    pub status: OrderStatus,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub notes: String,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }
}

/// A line of an order, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product: ProductId,
    pub product_name: String,
    pub qty: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Payload for `POST /api/checkout/confirm/`.
///
/// Optional fields are omitted from the JSON body when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    pub email: Email,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CheckoutRequest {
    /// Build a request with the required fields; optional ones start unset.
    #[must_use]
    pub fn new(
        email: Email,
        full_name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            email,
            full_name: full_name.into(),
            phone: None,
            address: address.into(),
            city: city.into(),
            region: None,
            notes: None,
        }
    }
}

/// Response to a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfirmation {
    #[serde(default)]
    pub detail: String,
    pub order: Order,
}
