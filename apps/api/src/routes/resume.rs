use std::path::Path;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/resume
/// Serves the configured resume PDF as a download.
pub async fn resume_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let path = &state.config.resume_path;

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound("Resume not found".into()));
        }
        Err(e) => return Err(AppError::Internal(e.into())),
    };

    let filename = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("resume.pdf");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
