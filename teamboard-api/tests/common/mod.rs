/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup
/// - Test user creation and token issuance
/// - API client helpers
///
/// Integration tests require a PostgreSQL instance. They are skipped
/// when TEST_DATABASE_URL is not set, so unit test runs do not need a
/// database.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use sqlx::PgPool;
use tower::Service as _;
use uuid::Uuid;

use teamboard_api::app::{build_router, AppState};
use teamboard_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use teamboard_shared::auth::jwt::{create_token, Claims};
use teamboard_shared::auth::password::hash_password;
use teamboard_shared::models::user::{CreateUser, User};

const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context, or None when TEST_DATABASE_URL is unset
    pub async fn new() -> anyhow::Result<Option<Self>> {
        let url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => return Ok(None),
        };

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: url.clone(),
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
                access_token_expire_hours: 1,
            },
        };

        let db = PgPool::connect(&url).await?;

        // Path relative to this crate's Cargo.toml
        sqlx::migrate!("../teamboard-shared/migrations")
            .run(&db)
            .await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(Some(TestContext { db, app, config }))
    }

    /// Creates a user directly in the database and returns it with a
    /// valid bearer token.
    pub async fn create_user(&self, email: &str, password: &str) -> anyhow::Result<(User, String)> {
        let user = User::create(
            &self.db,
            CreateUser {
                email: email.to_string(),
                password_hash: hash_password(password)?,
                is_superuser: false,
            },
        )
        .await?;

        let claims = Claims::new(user.id, Duration::hours(1));
        let token = create_token(&claims, &self.config.jwt.secret)?;

        Ok((user, token))
    }

    /// Creates a user with a unique email, for tests that do not care
    /// about the address itself.
    pub async fn create_random_user(&self) -> anyhow::Result<(User, String)> {
        let email = format!("test-{}@example.com", Uuid::new_v4());
        self.create_user(&email, "password123").await
    }

    /// Sends a request through the router and returns (status, body)
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Sends a form-encoded POST, as the login endpoint expects
    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
    ) -> (StatusCode, serde_json::Value) {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

        (status, json)
    }

    /// Deletes a test user, cascading to items and memberships
    pub async fn cleanup_user(&self, user_id: Uuid) -> anyhow::Result<()> {
        User::delete(&self.db, user_id).await?;
        Ok(())
    }
}

/// Minimal percent-encoding for form values used in tests
fn urlencode(s: &str) -> String {
    s.replace('@', "%40").replace('+', "%2B")
}

/// Creates a project through the API and returns its id
pub async fn create_test_project(ctx: &TestContext, token: &str, title: &str) -> Uuid {
    let (status, body) = ctx
        .request(
            "POST",
            "/api/projects/",
            Some(token),
            Some(serde_json::json!({ "title": title })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "project creation failed: {}", body);
    body["id"].as_str().unwrap().parse().unwrap()
}

/// Skips a test when no database is configured
#[macro_export]
macro_rules! require_db {
    () => {
        match common::TestContext::new().await.unwrap() {
            Some(ctx) => ctx,
            None => {
                eprintln!("TEST_DATABASE_URL not set, skipping integration test");
                return;
            }
        }
    };
}
