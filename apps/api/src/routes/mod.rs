pub mod blog;
pub mod contact;
pub mod health;
pub mod repos;
pub mod resume;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/repos", get(repos::repos_handler))
        .route("/api/resume", get(resume::resume_handler))
        .route("/api/contact", post(contact::contact_handler))
        .route("/api/blog", get(blog::blog_handler))
        .route("/api/health", get(health::health_handler))
        .with_state(state)
}
