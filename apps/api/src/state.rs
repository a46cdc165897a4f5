use crate::config::Config;
use crate::sources::github::GithubClient;
use crate::sources::medium::MediumClient;
use crate::store::CacheStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one cache store connection for the process; permanently degraded
    /// when the startup connect failed.
    pub store: CacheStore,
    pub github: GithubClient,
    pub medium: MediumClient,
    pub config: Config,
}
