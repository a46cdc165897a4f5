use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::contact::{ContactMessage, ContactSubmission};
use crate::state::AppState;
use crate::store::StoreError;

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// POST /api/contact
/// Stores the submission when the cache store is up. Storage being down never
/// fails the request; the response then carries an advisory `warning` and the
/// submission is logged so it is not lost silently.
pub async fn contact_handler(
    State(state): State<AppState>,
    Json(submission): Json<ContactSubmission>,
) -> Result<Json<ContactResponse>, AppError> {
    let entry = ContactMessage::from_submission(submission, Utc::now());

    match state.store.store_contact(&entry).await {
        Ok(()) => Ok(Json(ContactResponse {
            message: "Contact form submitted successfully".into(),
            warning: None,
        })),
        Err(e) => {
            match e {
                StoreError::Unavailable => info!(
                    "Contact submission (store unavailable): name={:?} email={:?} message={:?}",
                    entry.name, entry.email, entry.message
                ),
                other => warn!("Contact storage failed: {other}"),
            }
            Ok(Json(ContactResponse {
                message: "Contact form submitted (not stored)".into(),
                warning: Some(
                    "Cache store is not available; the message was not durably stored".into(),
                ),
            }))
        }
    }
}
