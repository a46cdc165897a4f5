use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw contact-form payload. Every field is optional on purpose: submissions
/// are accepted as-is and missing fields are stored as null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// A stored contact message. Written once with a server-assigned timestamp,
/// never read back by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn from_submission(submission: ContactSubmission, created_at: DateTime<Utc>) -> Self {
        ContactMessage {
            name: submission.name,
            email: submission.email,
            message: submission.message,
            created_at,
        }
    }
}
