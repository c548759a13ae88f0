use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app::AppState;

/// GET /health - liveness plus a store ping through each repository
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let mut failures = Vec::new();
    for repo in state.repositories() {
        if let Err(e) = repo.ping().await {
            tracing::error!("Health check failed for {}: {}", repo.kind().collection(), e);
            failures.push(e.to_string());
        }
    }

    if failures.is_empty() {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "store": "ok",
                "timestamp": now,
            })),
        )
    } else {
        let error = if crate::is_development!() { json!(failures) } else { json!({}) };
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "store": "unavailable",
                "timestamp": now,
                "message": "Store unavailable",
                "error": error,
            })),
        )
    }
}
