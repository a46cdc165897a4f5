use reqwest::{header, Client, StatusCode};
use serde_json::Value;

use crate::errors::AppError;

const GITHUB_API_BASE: &str = "https://api.github.com";

/// The frontend shows a fixed grid; only the most recently updated
/// repositories are requested.
const REPO_PAGE_SIZE: u32 = 12;

/// GitHub REST client for the repository listing.
///
/// The payload is passed through untouched: the frontend owns the shaping,
/// this service only proxies and caches.
#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(http: Client, token: Option<String>) -> Self {
        Self::with_base_url(http, GITHUB_API_BASE, token)
    }

    pub fn with_base_url(http: Client, base_url: &str, token: Option<String>) -> Self {
        GithubClient {
            http,
            base_url: base_url.to_string(),
            token,
        }
    }

    /// Lists the owner's `REPO_PAGE_SIZE` most recently updated repositories,
    /// newest first. Without a token the call is unauthenticated and subject
    /// to GitHub's lower anonymous rate limits.
    pub async fn list_repos(&self, username: &str) -> Result<Vec<Value>, AppError> {
        let url = format!("{}/users/{}/repos", self.base_url, username);
        let page_size = REPO_PAGE_SIZE.to_string();

        let mut request = self.http.get(&url).query(&[
            ("sort", "updated"),
            ("direction", "desc"),
            ("per_page", page_size.as_str()),
        ]);
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else if status == StatusCode::NOT_FOUND {
            Err(AppError::NotFound(format!(
                "GitHub user \"{username}\" not found"
            )))
        } else {
            Err(AppError::Upstream {
                status: status.as_u16(),
                message: format!("Failed to fetch repositories: {}", status.as_u16()),
            })
        }
    }
}
