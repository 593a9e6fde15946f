//! Cart types and the envelopes the cart endpoints answer with.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CartId, CartItemId, ProductId};
use super::money::lenient_amount;

/// A server-side cart.
///
/// `total` is computed by the backend; the client never recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub total: Decimal,
}

impl Cart {
    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line holding a given product.
    #[must_use]
    pub fn line_for(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id == product_id)
    }
}

/// One line of a cart.
///
/// `subtotal` equals `unit_price * qty`; the backend enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product: CartProduct,
    pub qty: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Product reference embedded in a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
}

/// Response to add/update/remove cart item calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartMutation {
    /// `added`, `updated` or `removed`.
    #[serde(default)]
    pub detail: String,
    pub cart: Cart,
}

/// Response to `GET /api/checkout/summary/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub cart: CheckoutCart,
}

/// The cart as seen at checkout, with shipping folded into the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutCart {
    pub id: CartId,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub shipping: Decimal,
    /// `None` when the backend sends no numeric total (empty carts).
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total: Option<Decimal>,
}
