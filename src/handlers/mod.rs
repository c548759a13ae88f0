// handlers/mod.rs - Two-tier handler layout
//
// Public (no credentials) → Protected (shared API key, see middleware::auth)
pub mod protected; // /tasks, /goals
pub mod public;    // /, /users, /health, /api-docs

use axum::http::Uri;

use crate::error::ApiError;

/// Catch-all for anything no route or static file answered.
pub async fn not_found(uri: Uri) -> ApiError {
    tracing::warn!("No route for {}", uri.path());
    ApiError::not_found("Not Found")
}
