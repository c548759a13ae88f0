mod common;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use nawal_planner_api::database::models::{NewResource, Resource, ResourceKind};
use nawal_planner_api::database::{RepositoryError, ResourceRepository};
use nawal_planner_api::middleware::ApiKeyGate;
use nawal_planner_api::AppState;

/// Backend whose store is unreachable; lookups by id panic.
struct BrokenRepository(ResourceKind);

#[async_trait]
impl ResourceRepository for BrokenRepository {
    fn kind(&self) -> ResourceKind {
        self.0
    }

    async fn list(&self) -> Result<Vec<Resource>, RepositoryError> {
        Err(RepositoryError::Store("connection refused".into()))
    }

    async fn find(&self, _id: Uuid) -> Result<Option<Resource>, RepositoryError> {
        panic!("cursor exhausted")
    }

    async fn insert(&self, _new: NewResource) -> Result<Resource, RepositoryError> {
        Err(RepositoryError::Store("connection refused".into()))
    }

    async fn remove(&self, _id: Uuid) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Store("connection refused".into()))
    }
}

async fn spawn_broken_server() -> Result<common::TestServer> {
    let state = AppState::new(
        Arc::new(BrokenRepository(ResourceKind::Task)),
        Arc::new(BrokenRepository(ResourceKind::Goal)),
        ApiKeyGate::new(Some(common::API_KEY.to_string())),
    );
    common::spawn_server_with_state(state).await
}

fn assert_internal_error(body: &Value) {
    assert!(body["message"].is_string(), "message missing: {}", body);
    assert!(body.get("error").is_some(), "error missing: {}", body);
}

#[tokio::test]
async fn store_failure_on_list_is_500_json() -> Result<()> {
    let server = spawn_broken_server().await?;

    let res = server.authed_get("/tasks").send().await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_internal_error(&res.json::<Value>().await?);
    Ok(())
}

#[tokio::test]
async fn store_failure_on_create_is_500_json() -> Result<()> {
    let server = spawn_broken_server().await?;
    let payload = json!({
        "name": "Run 5k",
        "description": "Weekend run",
        "dueDate": "2025-06-01"
    });

    let res = server.authed_post("/goals", &payload).send().await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_internal_error(&res.json::<Value>().await?);

    let res = server
        .authed_delete(&format!("/goals/{}", Uuid::new_v4()))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_internal_error(&res.json::<Value>().await?);
    Ok(())
}

#[tokio::test]
async fn validation_still_precedes_the_store() -> Result<()> {
    let server = spawn_broken_server().await?;

    let res = server
        .authed_post("/tasks", &json!({ "name": "Incomplete" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn panicking_handler_is_500_json() -> Result<()> {
    let server = spawn_broken_server().await?;

    let res = server
        .authed_get(&format!("/tasks/{}", Uuid::new_v4()))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Internal Server Error");
    assert_internal_error(&body);

    // the server keeps answering after a panic
    let res = server.get("/health").send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
