//! HTTP plumbing shared by the storefront and admin bindings.
//!
//! [`ApiClient`] builds every request: it resolves paths against the
//! configured origin, sends the session cookies, attaches the CSRF header to
//! state-changing methods, and turns non-2xx responses into
//! [`ApiError::RequestFailed`](crate::ApiError::RequestFailed).

mod client;
pub mod csrf;

pub use client::ApiClient;
pub use csrf::{CSRF_COOKIE, CSRF_HEADER};
