use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::AppConfig;
use crate::database::models::ResourceKind;

/// Errors raised while establishing or preparing the store connection
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the connection pool shared by both resource repositories
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Connect and confirm the store answers before any traffic is served.
    pub async fn connect(config: &AppConfig) -> Result<Self, DatabaseError> {
        let url = config
            .database_url()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let redacted = Self::redact(url)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(Duration::from_secs(config.database.connection_timeout))
            .connect(url)
            .await?;

        let manager = Self { pool };
        manager.health_check().await?;

        info!("Connected to store at {}", redacted);
        Ok(manager)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Create the resource tables when missing. There are no migrations beyond this.
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        for kind in ResourceKind::ALL {
            sqlx::query(&Self::create_table_sql(kind))
                .execute(&self.pool)
                .await?;
            info!("Collection ready: {}", kind.collection());
        }
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    // gen_random_uuid() is built in from PostgreSQL 13
    fn create_table_sql(kind: ResourceKind) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                seq BIGSERIAL NOT NULL,
                name TEXT NOT NULL CHECK (name <> ''),
                description TEXT NOT NULL CHECK (description <> ''),
                due_date TEXT NOT NULL CHECK (due_date <> ''),
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
            kind.collection()
        )
    }

    /// Connection string with the password masked, for logs.
    fn redact(raw: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("***"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
