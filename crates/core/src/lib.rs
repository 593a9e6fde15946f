//! Tienda Core - Shared domain types.
//!
//! This crate provides the types exchanged with the Tienda backend by every
//! client component:
//! - `storefront` - Customer-facing API bindings and the cart store
//! - `admin` - Staff-only product and order management bindings
//! - `cli` - Command-line front end over both
//!
//! # Architecture
//!
//! The core crate contains only types and boundary validation - no I/O and no
//! HTTP client. Response shapes mirror the backend's JSON; request payloads
//! that accept free-form input are validated before they leave the process.
//!
//! # Modules
//!
//! - [`types`] - IDs, money, statuses, catalog/cart/order/account shapes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
