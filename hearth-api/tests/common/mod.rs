/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - In-memory test database with migrations applied
/// - Router construction with a test configuration
/// - JSON request helpers
/// - A signup helper that drives the full magic-link flow

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hearth_api::app::{build_router, AppState};
use hearth_api::config::{ApiConfig, Config, DatabaseConfig, FrontendConfig, JwtConfig};
use hearth_shared::db::{migrations, pool};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::Service as _;

/// Test context containing the database pool and the app router
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret-at-least-32-bytes".to_string(),
        },
        frontend: FrontendConfig {
            url: "http://localhost:5173".to_string(),
        },
    }
}

impl TestContext {
    /// Creates a fresh in-memory database and router
    ///
    /// A single pooled connection keeps the in-memory database alive for
    /// the lifetime of the context.
    pub async fn new() -> Self {
        let db = pool::create_pool(pool::DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connect_timeout_seconds: 5,
        })
        .await
        .expect("Should create in-memory pool");

        migrations::run_migrations(&db)
            .await
            .expect("Should run migrations");

        let state = AppState::new(db.clone(), test_config());
        let app = build_router(state);

        TestContext { db, app }
    }

    /// Sends a JSON request and returns the status plus parsed body
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("Should build request"),
            None => builder.body(Body::empty()).expect("Should build request"),
        };

        let response = self
            .app
            .clone()
            .call(request)
            .await
            .expect("Request should not fail at the transport level");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Should read response body");

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body should be JSON")
        };

        (status, json)
    }

    /// Signs a user up via the full magic-link flow, returns a session token
    pub async fn signup(&self, email: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/magic-link",
                None,
                Some(serde_json::json!({ "email": email })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "magic-link: {}", body);

        let magic_token = body["token"].as_str().expect("Should issue a magic token");

        let (status, body) = self
            .request(
                "POST",
                "/api/auth/verify",
                None,
                Some(serde_json::json!({ "token": magic_token })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "verify: {}", body);

        body["access_token"]
            .as_str()
            .expect("Should issue a session token")
            .to_string()
    }

    /// Signs up a user and puts them in a new household
    pub async fn signup_with_household(&self, email: &str, household: &str) -> String {
        let token = self.signup(email).await;

        let (status, body) = self
            .request(
                "POST",
                "/api/households",
                Some(&token),
                Some(serde_json::json!({ "name": household })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create household: {}", body);

        token
    }
}
