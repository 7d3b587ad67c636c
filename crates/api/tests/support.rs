#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use vibekeeper_core::OccasionExtractor;
use vibekeeper_domain::{Config, ExtractorMode};
use vibekeeper_infra::DbManager;
use vibekeeper_lib::{router, AppContext, SharedContext};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Router over a fresh database, kept alive with its temporary directory.
pub struct TestApp {
    pub ctx: SharedContext,
    router: Router,
    /// Keep temporary directory alive for the lifetime of the app.
    _temp_dir: TempDir,
}

pub fn test_config(temp_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.database.path = temp_dir.path().join("vibekeeper.db").to_string_lossy().to_string();
    config.database.pool_size = 4;
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.extractor.mode = Some(ExtractorMode::Pattern);
    config
}

impl TestApp {
    /// Full context with pattern extraction.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temporary database directory");
        let ctx = AppContext::new(test_config(&temp_dir))
            .await
            .expect("application context should initialise");
        Self::from_context(Arc::new(ctx), temp_dir)
    }

    /// Full context built from `test_config` after `configure` adjusts it.
    pub async fn with_config(configure: impl FnOnce(&mut Config)) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temporary database directory");
        let mut config = test_config(&temp_dir);
        configure(&mut config);
        let ctx = AppContext::new(config).await.expect("application context should initialise");
        Self::from_context(Arc::new(ctx), temp_dir)
    }

    /// Context whose extraction is delegated to `extractor`.
    pub async fn with_extractor(extractor: Arc<dyn OccasionExtractor>) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temporary database directory");
        let config = test_config(&temp_dir);

        let db = Arc::new(
            DbManager::new(&config.database.path, config.database.pool_size)
                .expect("failed to initialise database manager"),
        );
        db.run_migrations().expect("failed to run schema migrations");

        let ctx = AppContext::with_extractor(config, db, extractor)
            .await
            .expect("application context should initialise");
        Self::from_context(Arc::new(ctx), temp_dir)
    }

    fn from_context(ctx: SharedContext, temp_dir: TempDir) -> Self {
        let router = router(Arc::clone(&ctx));
        Self { ctx, router, _temp_dir: temp_dir }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response =
            self.router.clone().oneshot(request).await.expect("router should not fail");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("readable body");
        (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
    }

    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let (status, text) = self.send(request).await;
        let value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).expect("JSON body")
        };
        (status, value)
    }

    pub async fn form(&self, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .expect("valid request");
        self.send(request).await
    }

    pub async fn get_page(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).expect("valid request");
        self.send(request).await
    }

    /// Dev-login and return the access token.
    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .json(
                Method::POST,
                "/api/auth/login/test",
                None,
                Some(serde_json::json!({ "email": email, "full_name": "Test User" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["access_token"].as_str().expect("access token").to_string()
    }
}
