use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{NewResource, Resource, ResourceKind};
use crate::database::repository::{RepositoryError, ResourceRepository};

const COLUMNS: &str = "id, name, description, due_date, created_at, updated_at";

/// PostgreSQL-backed collection. Each verb is a single statement, so the
/// store's row-level atomicity is the only concurrency guarantee.
pub struct PgResourceRepository {
    kind: ResourceKind,
    pool: PgPool,
}

impl PgResourceRepository {
    pub fn new(kind: ResourceKind, pool: PgPool) -> Self {
        Self { kind, pool }
    }

    fn table(&self) -> &'static str {
        self.kind.collection()
    }
}

#[async_trait]
impl ResourceRepository for PgResourceRepository {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    async fn list(&self) -> Result<Vec<Resource>, RepositoryError> {
        let sql = format!("SELECT {} FROM \"{}\" ORDER BY seq", COLUMNS, self.table());
        let rows = sqlx::query_as::<_, Resource>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Resource>, RepositoryError> {
        let sql = format!("SELECT {} FROM \"{}\" WHERE id = $1", COLUMNS, self.table());
        let row = sqlx::query_as::<_, Resource>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, new: NewResource) -> Result<Resource, RepositoryError> {
        let sql = format!(
            "INSERT INTO \"{}\" (name, description, due_date) VALUES ($1, $2, $3) RETURNING {}",
            self.table(),
            COLUMNS
        );
        let row = sqlx::query_as::<_, Resource>(&sql)
            .bind(&new.name)
            .bind(&new.description)
            .bind(&new.due_date)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Created {} {}", self.kind, row.id);
        Ok(row)
    }

    async fn remove(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let sql = format!("DELETE FROM \"{}\" WHERE id = $1", self.table());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
