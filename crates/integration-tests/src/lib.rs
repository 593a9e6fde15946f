//! Integration tests for the Tienda API client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tienda-integration-tests
//! ```
//!
//! The tests drive the real client crates against [`FakeBackend`], an
//! in-process axum server bound to an ephemeral port. It answers scripted
//! replies per method and path and records every request it receives, so
//! tests can assert on the exact headers and bodies the client sent.
//!
//! # Test Categories
//!
//! - `storefront_session` - CSRF priming, login, logout, registration
//! - `storefront_cart` - cart endpoints and the reactive cart store
//! - `storefront_checkout` - catalog and checkout
//! - `admin` - product, image and order management

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use tienda_admin::AdminClient;
use tienda_storefront::{ApiClient, ClientConfig, Storefront};

/// Token the default `/api/csrf/` route sets.
pub const DEFAULT_CSRF_TOKEN: &str = "fresh-token";

/// A canned response.
#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    body: String,
    set_cookie: Option<String>,
}

impl Reply {
    /// `200 OK` with a JSON body.
    #[must_use]
    pub fn json(value: &Value) -> Self {
        Self::status(StatusCode::OK, value.to_string())
    }

    /// Any status with a raw body.
    #[must_use]
    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            set_cookie: None,
        }
    }

    /// Add a `Set-Cookie` header (e.g. `"csrftoken=abc; Path=/"`).
    #[must_use]
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.set_cookie = Some(cookie.into());
        self
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        if let Some(cookie) = self.set_cookie
            && let Ok(value) = HeaderValue::from_str(&cookie)
        {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
        response
    }
}

/// A request as the fake backend received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    /// A header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The body as text (lossy).
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The body parsed as JSON, or `Value::Null` if it is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct Shared {
    replies: Mutex<HashMap<(Method, String), Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process stand-in for the Tienda backend.
pub struct FakeBackend {
    addr: SocketAddr,
    shared: Arc<Shared>,
}

impl FakeBackend {
    /// Bind an ephemeral port and start serving.
    ///
    /// `GET /api/csrf/` is pre-scripted to set [`DEFAULT_CSRF_TOKEN`]; any
    /// unscripted route answers 404.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&shared));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let backend = Self { addr, shared };
        backend.on(
            Method::GET,
            "/api/csrf/",
            Reply::json(&json!({"detail": "CSRF cookie set"}))
                .with_cookie(format!("csrftoken={DEFAULT_CSRF_TOKEN}; Path=/")),
        );
        backend
    }

    /// Script the reply for a method and path, replacing any earlier one.
    pub fn on(&self, method: Method, path: &str, reply: Reply) -> &Self {
        lock(&self.shared.replies).insert((method, path.to_string()), reply);
        self
    }

    /// The backend origin, e.g. `http://127.0.0.1:40123`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A fresh client (empty cookie jar) pointed at this backend.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        let config = ClientConfig::new(&self.url()).expect("Failed to build config");
        ApiClient::new(&config).expect("Failed to build client")
    }

    /// Customer bindings with a fresh cookie jar.
    #[must_use]
    pub fn storefront(&self) -> Storefront {
        Storefront::new(self.client())
    }

    /// Admin bindings with a fresh cookie jar.
    #[must_use]
    pub fn admin(&self) -> AdminClient {
        AdminClient::new(self.client())
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.shared.requests).clone()
    }

    /// Requests received for one path.
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// `(method, path)` of every request, for asserting call order.
    #[must_use]
    pub fn calls(&self) -> Vec<(Method, String)> {
        self.requests()
            .into_iter()
            .map(|r| (r.method, r.path))
            .collect()
    }
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let reply = lock(&shared.replies)
        .get(&(method.clone(), path.clone()))
        .cloned();

    lock(&shared.requests).push(RecordedRequest {
        method,
        path,
        headers,
        body,
    });

    reply
        .unwrap_or_else(|| {
            Reply::status(StatusCode::NOT_FOUND, json!({"detail": "Not found."}).to_string())
        })
        .into_response()
}

// ============================================================================
// Fixtures
// ============================================================================

/// A product as the catalog endpoints return it.
#[must_use]
pub fn product_json(id: i64, name: &str, price: &str, stock: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "slug": name.to_lowercase().replace(' ', "-"),
        "price": price,
        "stock": stock,
        "is_active": true,
        "image": null,
        "images": []
    })
}

/// A cart line.
#[must_use]
pub fn cart_item_json(id: i64, product_id: i64, price: &str, qty: u32, subtotal: &str) -> Value {
    json!({
        "id": id,
        "product": {"id": product_id, "name": format!("Product {product_id}"), "price": price},
        "qty": qty,
        "unit_price": price,
        "subtotal": subtotal
    })
}

/// A cart with the given lines and total.
#[must_use]
pub fn cart_json(items: &[Value], total: &str) -> Value {
    json!({"id": 1, "items": items, "total": total})
}

/// The envelope cart mutations return.
#[must_use]
pub fn mutation_json(detail: &str, cart: &Value) -> Value {
    json!({"detail": detail, "cart": cart})
}

/// An order as checkout and the admin endpoints return it.
#[must_use]
pub fn order_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "number": format!("ORD-{id:05}"),
        "status": status,
        "email": "ana@example.com",
        "full_name": "Ana Pérez",
        "phone": "",
        "address": "Calle 1",
        "city": "Lima",
        "region": "",
        "notes": "",
        "subtotal": "42.00",
        "shipping": "5.00",
        "total": "47.00",
        "created_at": "2026-01-15T10:30:00Z",
        "items": [{
            "id": 1,
            "product": 7,
            "product_name": "Mug",
            "qty": 2,
            "unit_price": "21.00",
            "subtotal": "42.00"
        }]
    })
}
