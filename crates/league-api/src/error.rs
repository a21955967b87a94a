//! Error types for the HTTP layer.
//!
//! [`ApiError`] turns engine failures into HTTP responses with a JSON body
//! of the form `{"error": "...", "status": 404}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use league_core::LeagueError;

/// Errors that can occur while serving a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The engine rejected the operation.
    #[error(transparent)]
    League(#[from] LeagueError),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request was malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::League(err) => match err {
                LeagueError::Validation { .. } => StatusCode::BAD_REQUEST,
                LeagueError::NotFound { .. } => StatusCode::NOT_FOUND,
                LeagueError::NotInitialized => StatusCode::CONFLICT,
                LeagueError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
                LeagueError::UnknownTeam { .. }
                | LeagueError::Schedule(_)
                | LeagueError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
