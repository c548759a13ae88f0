use axum::Json;
use serde_json::{json, Value};

/// GET / - static welcome payload
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to Nawal Planner API" }))
}

/// GET /users - placeholder listing
pub async fn users() -> Json<Value> {
    Json(json!({ "message": "Users API endpoint" }))
}
