//! CSRF double-submit cookie handling.
//!
//! The backend sets a client-readable `csrftoken` cookie; state-changing
//! requests must echo its value in the `X-CSRFToken` header.

/// Name of the cookie carrying the anti-forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header the token is echoed in.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Look up a cookie's value in a `Cookie` header (`a=1; b=2`).
///
/// Returns `None` when the cookie is absent or empty.
#[must_use]
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}
