use axum::{extract::State, Json};
use serde_json::Value;

use crate::cache::cached_or_fetch;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/repos
/// Serves the owner's repository list, from cache when fresh, otherwise from
/// the GitHub API. The payload is the upstream's repository objects verbatim.
pub async fn repos_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Value>>, AppError> {
    let username = state.config.github_username.clone().ok_or_else(|| {
        AppError::ConfigMissing(
            "GitHub username not configured. Set GITHUB_USERNAME in the environment".into(),
        )
    })?;

    let repos = cached_or_fetch(&state.store, "repos", &username, || {
        state.github.list_repos(&username)
    })
    .await?;

    Ok(Json(repos))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use mockito::Matcher;
    use reqwest::Client;
    use tower::ServiceExt;

    use crate::routes::{build_router, test_support::degraded_state};
    use crate::sources::github::GithubClient;

    #[tokio::test]
    async fn test_missing_username_is_a_config_error() {
        let app = build_router(degraded_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/repos")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("GitHub username not configured"));
    }

    #[tokio::test]
    async fn test_degraded_store_fetches_upstream_every_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/octocat/repos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"name": "spoon-knife"}]"#)
            .expect(2)
            .create_async()
            .await;

        let mut state = degraded_state();
        state.config.github_username = Some("octocat".into());
        state.github = GithubClient::with_base_url(Client::new(), &server.url(), None);
        let app = build_router(state);

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/api/repos")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        // No cache, so both requests hit the upstream.
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unknown_owner_maps_to_404() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/nobody/repos")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let mut state = degraded_state();
        state.config.github_username = Some("nobody".into());
        state.github = GithubClient::with_base_url(Client::new(), &server.url(), None);
        let app = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/repos")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
