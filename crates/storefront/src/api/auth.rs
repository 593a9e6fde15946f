//! Session endpoints: CSRF priming, ping, current user, login, logout and
//! registration.
//!
//! The backend keeps the session in a cookie, which the shared jar stores and
//! replays; nothing here tracks login state locally.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, instrument};

use tienda_core::{CurrentUser, Detail, Email, Pong, Registered};

use super::Storefront;
use crate::error::ApiError;

/// Registration form for `POST /api/auth/register/`.
///
/// The backend checks that both passwords match and meet its password
/// policy; failures come back as a `RequestFailed` body keyed by field.
pub struct Registration {
    pub username: String,
    pub email: Email,
    pub password: SecretString,
    pub password2: SecretString,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password2", &"[REDACTED]")
            .finish()
    }
}

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    password2: &'a str,
}

impl Storefront {
    /// `GET /api/csrf/` - have the backend set a fresh `csrftoken` cookie.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn ensure_csrf(&self) -> Result<Detail, ApiError> {
        let detail = self.client.get("/api/csrf/").await?;
        debug!(has_token = self.client.csrf_token().is_some(), "CSRF cookie primed");
        Ok(detail)
    }

    /// `GET /api/ping/` - liveness check.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<Pong, ApiError> {
        self.client.get("/api/ping/").await
    }

    /// `GET /api/auth/me/` - who the current session belongs to.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<CurrentUser, ApiError> {
        self.client.get("/api/auth/me/").await
    }

    /// `POST /api/auth/login/` after priming the CSRF cookie.
    ///
    /// Bad credentials and server errors are not distinguished; both surface
    /// as `ApiError::RequestFailed` with the backend's body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if priming or the login request fails.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Detail, ApiError> {
        self.prime_csrf().await?;

        let body = LoginBody {
            username,
            password: password.expose_secret(),
        };
        self.client.post("/api/auth/login/", &body).await
    }

    /// `POST /api/auth/logout/` with the current CSRF token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<Detail, ApiError> {
        self.client
            .post("/api/auth/logout/", &serde_json::json!({}))
            .await
    }

    /// `POST /api/auth/register/` after priming the CSRF cookie.
    ///
    /// On success the backend also logs the new user in.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if priming or the registration request fails.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: &Registration) -> Result<Registered, ApiError> {
        self.prime_csrf().await?;

        let body = RegisterBody {
            username: &registration.username,
            email: registration.email.as_str(),
            password: registration.password.expose_secret(),
            password2: registration.password2.expose_secret(),
        };
        self.client.post("/api/auth/register/", &body).await
    }
}
