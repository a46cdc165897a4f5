use axum::Json;
use serde_json::{json, Value};

/// GET /api/health
/// Liveness only: reports healthy whenever the process can respond, without
/// probing the cache store or either upstream.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
