use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::database::models::{Resource, ResourceInput};
use crate::database::repository::ResourceRepository;
use crate::error::ApiError;
use crate::handlers::not_found;
use crate::middleware::auth::{api_key_middleware, ApiKeyGate};

pub type SharedRepository = Arc<dyn ResourceRepository>;

/// Routes for one collection, mounted at `/{collection}`, every route gated by the API key.
/// Unsupported methods on these paths get the JSON 404 rather than an empty 405.
pub fn routes(repo: SharedRepository, gate: ApiKeyGate) -> Router {
    let base = format!("/{}", repo.kind().collection());

    Router::new()
        .route(
            &base,
            get(collection_get).post(collection_post).fallback(not_found),
        )
        .route(
            &format!("{}/:id", base),
            get(record_get).delete(record_delete).fallback(not_found),
        )
        .route_layer(middleware::from_fn_with_state(gate, api_key_middleware))
        .with_state(repo)
}

/// GET /{collection} - every record, store order
pub async fn collection_get(
    State(repo): State<SharedRepository>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    let records = repo.list().await?;
    Ok(Json(records))
}

/// POST /{collection} - create from `name`, `description`, `dueDate`
pub async fn collection_post(
    State(repo): State<SharedRepository>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let Json(body) = body?;
    let record = repo.create(ResourceInput::from_json(body)).await?;

    tracing::info!("Created {} {}", repo.kind(), record.id);
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /{collection}/:id
pub async fn record_get(
    State(repo): State<SharedRepository>,
    Path(id): Path<String>,
) -> Result<Json<Resource>, ApiError> {
    let record = repo.get(&id).await?;
    Ok(Json(record))
}

/// DELETE /{collection}/:id - 204 with an empty body
pub async fn record_delete(
    State(repo): State<SharedRepository>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    repo.delete(&id).await?;

    tracing::info!("Deleted {} {}", repo.kind(), id);
    Ok(StatusCode::NO_CONTENT)
}
