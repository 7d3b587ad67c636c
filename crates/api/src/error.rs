//! HTTP error rendering
//!
//! Every failure leaves the API as `{"detail": "<message>"}`. Server-side
//! failures are logged in full and answered with a generic message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use vibekeeper_domain::VibeKeeperError;

use crate::utils::logging::error_label;

const INTERNAL_DETAIL: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] VibeKeeperError),

    /// Request could not be decoded (body, query string or path)
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => match err {
                VibeKeeperError::Auth(_) => StatusCode::UNAUTHORIZED,
                VibeKeeperError::NotFound(_) => StatusCode::NOT_FOUND,
                VibeKeeperError::InvalidInput(_) | VibeKeeperError::Extraction(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                VibeKeeperError::Network(_) => StatusCode::BAD_GATEWAY,
                VibeKeeperError::Config(_)
                | VibeKeeperError::Database(_)
                | VibeKeeperError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Rejected { status, .. } => *status,
        }
    }

    /// Message safe to show to the client
    pub fn detail(&self) -> String {
        match self {
            ApiError::Domain(err) if self.status() == StatusCode::INTERNAL_SERVER_ERROR => {
                error!(kind = error_label(err), error = %err, "Request failed");
                INTERNAL_DETAIL.to_string()
            }
            ApiError::Domain(err) => {
                if matches!(err, VibeKeeperError::Network(_)) {
                    warn!(error = %err, "Upstream call failed");
                }
                err.message().to_string()
            }
            ApiError::Rejected { detail, .. } => detail.clone(),
        }
    }

    fn rejected(status: StatusCode, detail: String) -> Self {
        ApiError::Rejected { status, detail }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, Json(json!({ "detail": self.detail() }))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}
