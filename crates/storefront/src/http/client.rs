//! Request/response helper for the Tienda backend.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::csrf::{CSRF_COOKIE, CSRF_HEADER, cookie_value};
use crate::config::ClientConfig;
use crate::error::ApiError;

/// Maximum number of body characters copied into log events.
const LOG_BODY_LIMIT: usize = 500;

/// HTTP client bound to one backend origin.
///
/// Cloning is cheap and clones share the cookie jar, so a login performed
/// through one clone authenticates all of them.
///
/// Each call is a single attempt: no retry, no timeout, no backoff.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    cookies: Arc<Jar>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client with an empty cookie jar.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialize).
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let cookies = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
                cookies,
            }),
        })
    }

    /// The configured backend origin.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve an absolute request path (`/api/...`) against the origin.
    ///
    /// The path is appended to the origin as-is, so an origin with a path
    /// prefix (`https://host/shop`) keeps it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Url` if the result is not a valid URL.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        let origin = self.inner.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{origin}{path}"))?)
    }

    // =========================================================================
    // Cookies
    // =========================================================================

    /// Current value of a cookie the jar would send to the origin.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<String> {
        let header = self.inner.cookies.cookies(&self.inner.base_url)?;
        let header = header.to_str().ok()?;
        cookie_value(header, name).map(str::to_owned)
    }

    /// Current anti-forgery token, if the backend has set one.
    #[must_use]
    pub fn csrf_token(&self) -> Option<String> {
        self.cookie(CSRF_COOKIE)
    }

    /// Store a cookie for the origin, as if the backend had set it.
    pub fn set_cookie(&self, name: &str, value: &str) {
        self.inner
            .cookies
            .add_cookie_str(&format!("{name}={value}; Path=/"), &self.inner.base_url);
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// `GET` a path and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::RequestFailed` on a non-2xx status, `ApiError::Http`
    /// on transport failure and `ApiError::Decode` on an unexpected body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(&Method::GET, path)?;
        self.execute(&Method::GET, path, builder).await
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(&Method::POST, path)?.json(body);
        self.execute(&Method::POST, path, builder).await
    }

    /// `PATCH` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(&Method::PATCH, path)?.json(body);
        self.execute(&Method::PATCH, path, builder).await
    }

    /// `DELETE` a path (no body) and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(&Method::DELETE, path)?;
        self.execute(&Method::DELETE, path, builder).await
    }

    /// `POST` a multipart form and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let builder = self.request(&Method::POST, path)?.multipart(form);
        self.execute(&Method::POST, path, builder).await
    }

    /// Start a request, attaching the CSRF header to state-changing methods.
    ///
    /// The cookie is read here, once per request, so the header always
    /// carries the token current at call time.
    fn request(&self, method: &Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        let mut builder = self.inner.client.request(method.clone(), url);

        if !method.is_safe() {
            match self.csrf_token() {
                Some(token) => builder = builder.header(CSRF_HEADER, token),
                None => debug!(%method, path, "No CSRF cookie set; sending without token"),
            }
        }

        Ok(builder)
    }

    #[instrument(skip_all, fields(method = %method, path = %path))]
    async fn execute<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        // Read as text first so failures keep the body verbatim
        let body = response.text().await?;

        if !status.is_success() {
            warn!(
                status = %status,
                body = %truncate(&body),
                "Backend returned non-success status"
            );
            return Err(ApiError::RequestFailed { status, body });
        }

        debug!(status = %status, bytes = body.len(), "Backend responded");

        serde_json::from_str(&body).map_err(|e| {
            warn!(
                error = %e,
                body = %truncate(&body),
                "Failed to decode backend response"
            );
            ApiError::Decode(e)
        })
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}
