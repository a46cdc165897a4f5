use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required owner identity is not configured. Surfaced per request so
    /// the rest of the API keeps working with partial configuration.
    #[error("{0}")]
    ConfigMissing(String),

    #[error("{0}")]
    NotFound(String),

    /// Upstream answered with a non-success status; surfaced with that status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Network-level failure talking to an upstream.
    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Feed(String),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::ConfigMissing(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Upstream { status, message } => (
                // The upstream's own status is passed through when it is a
                // valid response code; anything else reads as a bad gateway.
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                message.clone(),
            ),
            AppError::Http(e) => {
                tracing::error!("Upstream request failed: {e}");
                (StatusCode::BAD_GATEWAY, format!("Upstream request failed: {e}"))
            }
            AppError::Feed(msg) => {
                tracing::error!("Feed error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}
