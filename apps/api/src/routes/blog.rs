use axum::{extract::State, Json};

use crate::cache::cached_or_fetch;
use crate::errors::AppError;
use crate::models::blog::BlogPost;
use crate::state::AppState;

/// GET /api/blog
/// Serves the owner's normalized blog posts, from cache when fresh, otherwise
/// from the Medium RSS feed.
pub async fn blog_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogPost>>, AppError> {
    let username = state.config.medium_username.clone().ok_or_else(|| {
        AppError::ConfigMissing(
            "Medium username not configured. Set MEDIUM_USERNAME in the environment".into(),
        )
    })?;

    let posts = cached_or_fetch(&state.store, "blog_posts", &username, || {
        state.medium.fetch_posts(&username)
    })
    .await?;

    Ok(Json(posts))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use reqwest::Client;
    use tower::ServiceExt;

    use crate::routes::{build_router, test_support::degraded_state};
    use crate::sources::medium::MediumClient;

    #[tokio::test]
    async fn test_missing_username_is_a_config_error() {
        let app = build_router(degraded_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/blog")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_feed_maps_to_500() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/@writer")
            .with_status(200)
            .with_body("this is not a feed")
            .create_async()
            .await;

        let mut state = degraded_state();
        state.config.medium_username = Some("writer".into());
        state.medium = MediumClient::with_base_url(Client::new(), &server.url());
        let app = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/blog")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_posts_served_as_json_array() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/@writer")
            .with_status(200)
            .with_body(
                r#"<?xml version="1.0" encoding="UTF-8"?>
                <rss version="2.0">
                  <channel>
                    <title>Stories</title>
                    <item>
                      <title>hello</title>
                      <link>https://x/1</link>
                      <description>plain words</description>
                    </item>
                  </channel>
                </rss>"#,
            )
            .create_async()
            .await;

        let mut state = degraded_state();
        state.config.medium_username = Some("writer".into());
        state.medium = MediumClient::with_base_url(Client::new(), &server.url());
        let app = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/blog")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json[0]["title"], "hello");
        assert_eq!(json[0]["description"], "plain words");
        assert_eq!(json[0]["author"], "writer");
    }
}
