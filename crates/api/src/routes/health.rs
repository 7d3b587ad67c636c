//! Liveness endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::task;
use tracing::warn;

use crate::context::SharedContext;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// Report service and database health; 503 when the database check fails.
pub async fn health(State(ctx): State<SharedContext>) -> (StatusCode, Json<HealthResponse>) {
    let db = Arc::clone(&ctx.db);
    let database_ok = match task::spawn_blocking(move || db.health_check()).await {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            warn!(error = %err, "Database health check failed");
            false
        }
        Err(err) => {
            warn!(error = %err, "Database health check task failed");
            false
        }
    };

    if database_ok {
        (StatusCode::OK, Json(HealthResponse { status: "ok", database: "ok" }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse { status: "degraded", database: "unavailable" }),
        )
    }
}

pub async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}
