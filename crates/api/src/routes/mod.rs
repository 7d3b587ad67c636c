//! HTTP routes
//!
//! # Routes
//! - Public:
//!   - `GET /health`, `GET /ping`
//!   - `POST /api/auth/login/test`: dev login
//!   - `POST /api/occasions/extract`: extraction preview
//!   - `GET /`, `GET /occasions`, `POST /add_occasion`, `POST /search`: HTML pages
//!     acting as the configured guest user
//! - Bearer token required:
//!   - `GET /api/auth/me`
//!   - `POST /api/occasions/quick-add`
//!   - `GET|POST /api/occasions`
//!   - `GET|PATCH|DELETE /api/occasions/{id}`

pub mod auth;
pub mod health;
pub mod occasions;
pub mod web;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use vibekeeper_domain::ServerConfig;

use crate::context::SharedContext;

/// Build the application router with CORS and request tracing.
pub fn router(ctx: SharedContext) -> Router {
    let cors = cors_layer(&ctx.config.server);

    Router::new()
        .route("/health", get(health::health))
        .route("/ping", get(health::ping))
        .nest("/api", api_routes())
        .merge(web::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(ctx)
}

fn api_routes() -> Router<SharedContext> {
    Router::new()
        .route("/auth/login/test", post(auth::login_test))
        .route("/auth/me", get(auth::me))
        .route("/occasions", get(occasions::list).post(occasions::create))
        .route("/occasions/", get(occasions::list).post(occasions::create))
        .route("/occasions/extract", post(occasions::extract))
        .route("/occasions/quick-add", post(occasions::quick_add))
        .route(
            "/occasions/{id}",
            get(occasions::get).patch(occasions::update).delete(occasions::delete),
        )
}

/// Credentials are allowed for an explicit origin list; `*` opens CORS
/// without credentials.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if server.cors_origins.iter().any(|origin| origin.trim() == "*") {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(origins)).allow_credentials(true)
}
