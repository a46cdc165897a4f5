use feed_rs::model::Entry;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;

use crate::errors::AppError;
use crate::models::blog::BlogPost;

const MEDIUM_FEED_BASE: &str = "https://medium.com/feed";

/// Matches the frontend's blog grid; older entries are dropped.
pub const MAX_POSTS: usize = 12;
pub const DESCRIPTION_MAX_CHARS: usize = 200;

static IMG_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img[^>]+src="([^"]+)""#).expect("img regex"));
static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));

/// Fetches a Medium user's RSS feed and normalizes it into [`BlogPost`]s.
#[derive(Clone)]
pub struct MediumClient {
    http: Client,
    base_url: String,
}

impl MediumClient {
    pub fn new(http: Client) -> Self {
        Self::with_base_url(http, MEDIUM_FEED_BASE)
    }

    pub fn with_base_url(http: Client, base_url: &str) -> Self {
        MediumClient {
            http,
            base_url: base_url.to_string(),
        }
    }

    pub async fn fetch_posts(&self, username: &str) -> Result<Vec<BlogPost>, AppError> {
        let url = format!("{}/@{}", self.base_url, username);
        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: format!("Failed to fetch blog feed: {}", status.as_u16()),
            });
        }

        let body = response.bytes().await?;
        parse_feed(&body, username)
    }
}

/// Parses feed XML into normalized posts, feed order preserved.
/// A feed with zero entries is valid; a body that does not parse as a feed
/// is an error.
pub fn parse_feed(body: &[u8], owner: &str) -> Result<Vec<BlogPost>, AppError> {
    let feed = feed_rs::parser::parse(body)
        .map_err(|e| AppError::Feed(format!("Failed to parse blog feed: {e}")))?;

    Ok(feed
        .entries
        .iter()
        .take(MAX_POSTS)
        .map(|entry| entry_to_post(entry, owner))
        .collect())
}

fn entry_to_post(entry: &Entry, fallback_author: &str) -> BlogPost {
    let image = entry
        .content
        .as_ref()
        .and_then(|c| c.body.as_deref())
        .and_then(extract_image);

    let description = entry
        .summary
        .as_ref()
        .map(|s| truncate_chars(strip_markup(&s.content).trim(), DESCRIPTION_MAX_CHARS))
        .unwrap_or_default();

    let author = entry
        .authors
        .iter()
        .map(|p| p.name.trim())
        .find(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback_author.to_string());

    BlogPost {
        title: entry
            .title
            .as_ref()
            .map(|t| t.content.clone())
            .unwrap_or_default(),
        link: entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default(),
        published: entry
            .published
            .map(|ts| ts.to_rfc2822())
            .unwrap_or_default(),
        description,
        image,
        author,
    }
}

/// First image reference in an HTML fragment, if any.
pub fn extract_image(html: &str) -> Option<String> {
    IMG_SRC.captures(html).map(|caps| caps[1].to_string())
}

/// Drops every tag, keeping the text between them.
pub fn strip_markup(html: &str) -> String {
    MARKUP_TAG.replace_all(html, "").into_owned()
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
