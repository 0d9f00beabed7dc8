//! Common test utilities for integration tests
//!
//! Every `TestApp` owns a private in-memory SQLite database with migrations
//! applied, so tests are isolated and need no external services.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use login_portal_backend::{
    config::AppConfig,
    db::{self, DbConfig},
    routes,
    state::AppState,
};
use tower::ServiceExt;

/// Response pieces the tests look at
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Target of a redirect, if any
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// `name=value` of the first `Set-Cookie` header, if any
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with a fresh database
    pub async fn new() -> Self {
        let pool = db::create_pool_with_config(&DbConfig::in_memory())
            .await
            .expect("Failed to create test database pool");
        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(pool, AppConfig::default());
        let app = routes::create_router(state.clone());

        Self { app, state }
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Make a GET request, optionally with a cookie
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Make a POST request with an urlencoded form body
    pub async fn post_form(&self, path: &str, body: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Make a POST request with an arbitrary (or no) content type
    pub async fn post_raw(
        &self,
        path: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> TestResponse {
        let mut builder = Request::builder().method("POST").uri(path);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Submit the signup form
    pub async fn signup(&self, username: &str, password: &str) -> TestResponse {
        self.post_form("/signup", &form_body(username, password), None)
            .await
    }

    /// Submit the login form
    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.post_form("/login", &form_body(username, password), None)
            .await
    }
}

/// Encode the two credential fields
///
/// Test values stick to characters that need no percent-encoding.
pub fn form_body(username: &str, password: &str) -> String {
    format!("login-id={}&password={}", username, password)
}

/// A username no other test uses
pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, &uuid::Uuid::new_v4().simple().to_string()[..12])
}
