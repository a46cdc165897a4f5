use serde::{Deserialize, Serialize};

/// A normalized blog post derived from one feed entry.
/// The feed's HTML is reduced to a plain-text description; the first image
/// reference in the entry body is kept as a thumbnail candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub link: String,
    /// Publication date as given by the feed, empty when absent.
    pub published: String,
    /// Plain text, at most 200 characters.
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub author: String,
}
