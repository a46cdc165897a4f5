use anyhow::{Context, Result};

/// Application configuration loaded from environment variables at startup.
/// Nothing else in the crate reads the environment directly.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub cache_namespace: String,
    /// GitHub owner whose repositories are proxied. Checked per request,
    /// not at startup, so the rest of the API works without it.
    pub github_username: Option<String>,
    pub github_token: Option<String>,
    /// Medium handle whose feed is proxied. Same per-request check.
    pub medium_username: Option<String>,
    pub frontend_url: Option<String>,
    pub allow_all_origins: bool,
    pub resume_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            redis_url: strip_quotes(
                &std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/".into()),
            ),
            cache_namespace: std::env::var("CACHE_NAMESPACE")
                .unwrap_or_else(|_| "portfolio".into()),
            github_username: optional_env("GITHUB_USERNAME"),
            github_token: optional_env("GITHUB_TOKEN"),
            medium_username: optional_env("MEDIUM_USERNAME"),
            frontend_url: optional_env("FRONTEND_URL"),
            allow_all_origins: std::env::var("ALLOW_ALL_ORIGINS")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            resume_path: std::env::var("RESUME_PATH").unwrap_or_else(|_| "RESUME.pdf".into()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Treats unset and empty variables the same; an empty owner identity is
/// as unusable as a missing one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Connection strings pasted into .env files often keep their surrounding
/// quotes; tolerate that instead of failing the connect.
fn strip_quotes(value: &str) -> String {
    value
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}
