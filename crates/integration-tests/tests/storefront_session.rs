//! Integration tests for CSRF handling and the session endpoints.

use reqwest::{Method, StatusCode};
use secrecy::SecretString;
use serde_json::json;

use tienda_core::Email;
use tienda_integration_tests::{DEFAULT_CSRF_TOKEN, FakeBackend, Reply};
use tienda_storefront::Registration;
use tienda_storefront::http::{CSRF_COOKIE, CSRF_HEADER};

fn password(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

// ============================================================================
// Read-only Endpoints
// ============================================================================

#[tokio::test]
async fn test_ping() {
    let backend = FakeBackend::start().await;
    backend.on(Method::GET, "/api/ping/", Reply::json(&json!({"message": "pong"})));

    let pong = backend.storefront().ping().await.expect("ping");

    assert_eq!(pong.message, "pong");
}

#[tokio::test]
async fn test_me_anonymous() {
    let backend = FakeBackend::start().await;
    backend.on(
        Method::GET,
        "/api/auth/me/",
        Reply::json(&json!({"authenticated": false})),
    );

    let user = backend.storefront().me().await.expect("me");

    assert!(!user.authenticated);
    assert!(user.username.is_none());
    assert!(!user.is_admin());
}

#[tokio::test]
async fn test_safe_methods_never_carry_csrf_header() {
    let backend = FakeBackend::start().await;
    backend.on(Method::GET, "/api/ping/", Reply::json(&json!({"message": "pong"})));

    let storefront = backend.storefront();
    storefront.client().set_cookie(CSRF_COOKIE, "abc123");
    storefront.ping().await.expect("ping");

    let request = &backend.requests_to("/api/ping/")[0];
    assert!(request.header(CSRF_HEADER).is_none());
}

#[tokio::test]
async fn test_ensure_csrf_stores_cookie() {
    let backend = FakeBackend::start().await;
    let storefront = backend.storefront();
    assert!(storefront.client().csrf_token().is_none());

    storefront.ensure_csrf().await.expect("csrf");

    assert_eq!(
        storefront.client().csrf_token().as_deref(),
        Some(DEFAULT_CSRF_TOKEN)
    );
}

// ============================================================================
// Login / Logout
// ============================================================================

#[tokio::test]
async fn test_login_primes_then_sends_token_and_credentials() {
    let backend = FakeBackend::start().await;
    backend.on(
        Method::GET,
        "/api/csrf/",
        Reply::json(&json!({"detail": "CSRF cookie set"})).with_cookie("csrftoken=abc123; Path=/"),
    );
    backend.on(
        Method::POST,
        "/api/auth/login/",
        Reply::json(&json!({"detail": "Logged in."})),
    );

    let detail = backend
        .storefront()
        .login("u", &password("p"))
        .await
        .expect("login");

    assert_eq!(detail.detail, "Logged in.");
    assert_eq!(
        backend.calls(),
        vec![
            (Method::GET, "/api/csrf/".to_string()),
            (Method::POST, "/api/auth/login/".to_string()),
        ]
    );

    let login = &backend.requests_to("/api/auth/login/")[0];
    assert_eq!(login.header(CSRF_HEADER), Some("abc123"));
    assert_eq!(login.json(), json!({"username": "u", "password": "p"}));
}

#[tokio::test]
async fn test_login_failure_returns_backend_body_verbatim() {
    let backend = FakeBackend::start().await;
    let body = "invalid credentials";
    backend.on(
        Method::POST,
        "/api/auth/login/",
        Reply::status(StatusCode::BAD_REQUEST, body),
    );

    let err = backend
        .storefront()
        .login("u", &password("wrong"))
        .await
        .expect_err("login should fail");

    assert!(err.is_request_failed());
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(err.body(), Some(body));
    assert_eq!(err.to_string(), body);
}

#[tokio::test]
async fn test_csrf_priming_failure_aborts_login() {
    let backend = FakeBackend::start().await;
    backend.on(
        Method::GET,
        "/api/csrf/",
        Reply::status(StatusCode::SERVICE_UNAVAILABLE, "down"),
    );

    let err = backend
        .storefront()
        .login("u", &password("p"))
        .await
        .expect_err("priming should fail");

    assert_eq!(err.to_string(), "down");
    assert!(backend.requests_to("/api/auth/login/").is_empty());
}

#[tokio::test]
async fn test_logout_reuses_current_token_without_priming() {
    let backend = FakeBackend::start().await;
    backend.on(
        Method::POST,
        "/api/auth/logout/",
        Reply::json(&json!({"detail": "Logged out."})),
    );

    let storefront = backend.storefront();
    storefront.client().set_cookie(CSRF_COOKIE, "abc123");
    storefront.logout().await.expect("logout");

    assert_eq!(
        backend.calls(),
        vec![(Method::POST, "/api/auth/logout/".to_string())]
    );
    let logout = &backend.requests()[0];
    assert_eq!(logout.header(CSRF_HEADER), Some("abc123"));
    assert_eq!(logout.json(), json!({}));
}

#[tokio::test]
async fn test_unsafe_request_without_cookie_omits_header() {
    let backend = FakeBackend::start().await;
    backend.on(
        Method::POST,
        "/api/auth/logout/",
        Reply::status(StatusCode::FORBIDDEN, r#"{"detail":"CSRF Failed"}"#),
    );

    let err = backend
        .storefront()
        .logout()
        .await
        .expect_err("backend rejects missing token");

    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert!(backend.requests()[0].header(CSRF_HEADER).is_none());
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_primes_and_sends_both_passwords() {
    let backend = FakeBackend::start().await;
    backend.on(
        Method::POST,
        "/api/auth/register/",
        Reply::json(&json!({"detail": "Registered.", "username": "ana"})),
    );

    let storefront = backend.storefront();
    storefront.client().set_cookie(CSRF_COOKIE, "stale");

    let registration = Registration {
        username: "ana".to_string(),
        email: Email::parse("ana@example.com").expect("email"),
        password: password("s3cret-pass"),
        password2: password("s3cret-pass"),
    };
    let registered = storefront.register(&registration).await.expect("register");

    assert_eq!(registered.username, "ana");

    let request = &backend.requests_to("/api/auth/register/")[0];
    assert_eq!(request.header(CSRF_HEADER), Some(DEFAULT_CSRF_TOKEN));
    assert_eq!(
        request.json(),
        json!({
            "username": "ana",
            "email": "ana@example.com",
            "password": "s3cret-pass",
            "password2": "s3cret-pass"
        })
    );
}

#[tokio::test]
async fn test_register_field_errors_come_back_as_body() {
    let backend = FakeBackend::start().await;
    let body = r#"{"password2":["Passwords do not match."]}"#;
    backend.on(
        Method::POST,
        "/api/auth/register/",
        Reply::status(StatusCode::BAD_REQUEST, body),
    );

    let registration = Registration {
        username: "ana".to_string(),
        email: Email::parse("ana@example.com").expect("email"),
        password: password("one-password"),
        password2: password("another-password"),
    };
    let err = backend
        .storefront()
        .register(&registration)
        .await
        .expect_err("register should fail");

    assert_eq!(err.body(), Some(body));
}
