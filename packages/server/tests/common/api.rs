//! In-process API client.
//!
//! Drives the full axum router (JWT middleware, extractors, handlers) with
//! `tower::ServiceExt::oneshot` against the in-memory store. No network, no
//! containers.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use volunteer_core::domains::auth::{JwtService, Role};
use volunteer_core::kernel::ServerDeps;
use volunteer_core::server::build_app;

pub const ADMIN_EMAIL: &str = "admin@example.edu";

pub struct TestApp {
    pub deps: ServerDeps,
    router: Router,
}

/// Status plus parsed JSON body (`Value::Null` for an empty body)
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Fresh app over an empty in-memory store; `ADMIN_EMAIL` is a configured admin
    pub fn new() -> Self {
        let jwt_service = Arc::new(JwtService::new("test_secret_key", "test_issuer".to_string()));
        let deps = ServerDeps::in_memory(jwt_service, vec![ADMIN_EMAIL.to_string()]);
        let router = build_app(deps.clone(), false);
        Self { deps, router }
    }

    pub fn token_for(&self, email: &str, role: Role) -> String {
        self.deps
            .jwt_service
            .create_token(email, role)
            .expect("token should sign")
    }

    pub fn admin_token(&self) -> String {
        self.token_for(ADMIN_EMAIL, Role::Admin)
    }

    pub fn volunteer_token(&self, email: &str) -> String {
        self.token_for(email, Role::Volunteer)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }
}

/// Field names of a `{errors:[{field,msg}]}` body
pub fn error_fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["field"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
