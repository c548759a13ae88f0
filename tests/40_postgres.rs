// Runs against a real PostgreSQL only when TEST_DATABASE_URL is set; otherwise each test returns early.

use anyhow::Result;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;

use nawal_planner_api::database::models::{ResourceInput, ResourceKind};
use nawal_planner_api::database::{
    DatabaseManager, PgResourceRepository, RepositoryError, ResourceRepository,
};

async fn repository(kind: ResourceKind) -> Result<Option<PgResourceRepository>> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return Ok(None);
    };

    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await?;
    DatabaseManager::from_pool(pool.clone()).ensure_schema().await?;
    Ok(Some(PgResourceRepository::new(kind, pool)))
}

#[tokio::test]
async fn postgres_create_get_delete() -> Result<()> {
    let Some(repo) = repository(ResourceKind::Task).await? else {
        return Ok(());
    };

    let created = repo
        .create(ResourceInput::from_json(json!({
            "name": "Buy milk",
            "description": "Go to the store",
            "dueDate": "2025-12-01"
        })))
        .await?;
    let id = created.id.to_string();

    let fetched = repo.get(&id).await?;
    assert_eq!(fetched.name, "Buy milk");
    assert_eq!(fetched.due_date, "2025-12-01");
    assert!(repo.list().await?.iter().any(|r| r.id == created.id));

    repo.delete(&id).await?;
    assert!(matches!(repo.get(&id).await, Err(RepositoryError::NotFound { .. })));
    assert!(matches!(repo.delete(&id).await, Err(RepositoryError::NotFound { .. })));
    Ok(())
}

#[tokio::test]
async fn postgres_rejects_invalid_input_before_writing() -> Result<()> {
    let Some(repo) = repository(ResourceKind::Goal).await? else {
        return Ok(());
    };

    let before = repo.list().await?.len();
    let result = repo
        .create(ResourceInput::from_json(json!({ "name": "Incomplete Goal" })))
        .await;
    assert!(matches!(result, Err(RepositoryError::Validation(_))));
    assert_eq!(repo.list().await?.len(), before);

    assert!(repo.ping().await.is_ok());
    Ok(())
}
