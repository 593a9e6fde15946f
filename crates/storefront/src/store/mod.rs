//! Client-side state containers.
//!
//! - [`CartStore`] - cached cart snapshot with derived count/total views

mod cart;

pub use cart::{CartBackend, CartStore, CartSummary};
