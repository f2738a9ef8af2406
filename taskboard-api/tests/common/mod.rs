/// Common test utilities for integration tests
///
/// Provides shared infrastructure for driving the full router in-process:
/// - Test database setup (migrations run on connect)
/// - Request building and JSON body parsing
/// - Register/login helpers that capture the session cookie
///
/// Tests require a PostgreSQL instance reachable via `TEST_DATABASE_URL`.
/// When the variable is unset, [`TestContext::try_new`] returns `None` and
/// each test returns early without failing.

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config, DatabaseConfig, SessionConfig};
use tower::Service as _;

static UNIQUE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Test context containing the database pool and an in-process router
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub cookie_name: String,
}

impl TestContext {
    /// Creates a new test context, or None when TEST_DATABASE_URL is unset
    pub async fn try_new() -> anyhow::Result<Option<Self>> {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set; skipping database integration test");
            return Ok(None);
        };

        let db = PgPool::connect(&url).await?;

        // Path relative to Cargo.toml, not this file
        sqlx::migrate!("../migrations").run(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            session: SessionConfig {
                cookie_name: "taskboard_session".to_string(),
                ttl_hours: 1,
            },
        };

        let cookie_name = config.session.cookie_name.clone();
        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(Some(TestContext {
            db,
            app,
            cookie_name,
        }))
    }

    /// Sends a JSON request, optionally attaching a session cookie
    pub async fn send(
        &mut self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.app.call(request).await.unwrap()
    }

    /// Registers a user, asserting success
    pub async fn register(&mut self, username: &str, email: &str, password: &str) -> i64 {
        let response = self
            .send(
                Method::POST,
                "/api/register",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                })),
            )
            .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        json["userId"].as_i64().unwrap()
    }

    /// Logs in and returns the session cookie pair ("name=token")
    pub async fn login(&mut self, email: &str, password: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/api/login",
                None,
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
            )
            .await;

        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login response must set the session cookie")
            .to_str()
            .unwrap();

        // First attribute is the name=token pair
        let pair = set_cookie.split(';').next().unwrap().trim().to_string();
        assert!(pair.starts_with(&format!("{}=", self.cookie_name)));
        pair
    }

    /// Registers a fresh user and logs them in, returning (user_id, cookie)
    pub async fn register_and_login(&mut self, label: &str) -> (i64, String) {
        let email = unique_email(label);
        let user_id = self.register(label, &email, "password123").await;
        let cookie = self.login(&email, "password123").await;
        (user_id, cookie)
    }
}

/// Generates a unique email so tests can share a database
pub fn unique_email(label: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let n = UNIQUE_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}@example.com", label, nanos, n)
}

/// Reads a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
