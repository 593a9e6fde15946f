//! Session and account response shapes.

use serde::{Deserialize, Serialize};

/// Generic acknowledgement body: `{"detail": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    #[serde(default)]
    pub detail: String,
}

/// Response to `GET /api/ping/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pong {
    pub message: String,
}

/// Response to a successful registration (the new user is logged in).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registered {
    #[serde(default)]
    pub detail: String,
    pub username: String,
}

/// Response to `GET /api/auth/me/`.
///
/// Anonymous sessions only carry `authenticated: false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Staff users may call the admin endpoints.
    #[serde(default)]
    pub is_staff: bool,
}

impl CurrentUser {
    /// Whether the session belongs to a logged-in staff user.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.authenticated && self.is_staff
    }
}
