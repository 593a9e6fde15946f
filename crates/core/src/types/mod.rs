//! Domain types for the Tienda backend API.
//!
//! This module provides type-safe wrappers and response/request shapes.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod email;
pub mod id;
pub mod money;
pub mod order;
pub mod status;
pub mod validation;

pub use account::{CurrentUser, Detail, Pong, Registered};
pub use cart::{Cart, CartItem, CartMutation, CartProduct, CheckoutCart, CheckoutSummary};
pub use catalog::{NewProduct, Product, ProductImage, ProductPatch};
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Decimal, display_amount, lenient_amount};
pub use order::{CheckoutConfirmation, CheckoutRequest, Order, OrderItem};
pub use status::OrderStatus;
pub use validation::ValidationError;
