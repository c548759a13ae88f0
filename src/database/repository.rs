use async_trait::async_trait;
use uuid::Uuid;

use crate::database::models::{NewResource, Resource, ResourceInput, ResourceKind, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{kind} not found")]
    NotFound { kind: ResourceKind, id: Uuid },

    #[error("Invalid {kind} id: {value}")]
    InvalidIdentifier { kind: ResourceKind, value: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::Store(err.to_string())
    }
}

/// Data access for one collection. Backends implement the primitive verbs;
/// id parsing, validation and not-found handling are shared.
#[async_trait]
pub trait ResourceRepository: Send + Sync + 'static {
    fn kind(&self) -> ResourceKind;

    async fn list(&self) -> Result<Vec<Resource>, RepositoryError>;

    async fn find(&self, id: Uuid) -> Result<Option<Resource>, RepositoryError>;

    async fn insert(&self, new: NewResource) -> Result<Resource, RepositoryError>;

    /// Returns whether a record was removed.
    async fn remove(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Cheap connectivity check for health reporting.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Resource, RepositoryError> {
        let id = self.parse_id(id)?;
        self.find(id)
            .await?
            .ok_or(RepositoryError::NotFound { kind: self.kind(), id })
    }

    async fn create(&self, input: ResourceInput) -> Result<Resource, RepositoryError> {
        let new = input.validate()?;
        self.insert(new).await
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let id = self.parse_id(id)?;
        if self.remove(id).await? {
            Ok(())
        } else {
            Err(RepositoryError::NotFound { kind: self.kind(), id })
        }
    }

    fn parse_id(&self, raw: &str) -> Result<Uuid, RepositoryError> {
        Uuid::parse_str(raw).map_err(|_| RepositoryError::InvalidIdentifier {
            kind: self.kind(),
            value: raw.to_string(),
        })
    }
}
