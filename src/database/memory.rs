use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{NewResource, Resource, ResourceKind};
use crate::database::repository::{RepositoryError, ResourceRepository};

/// Process-local collection for tests and store-less runs. Nothing survives a restart.
pub struct MemoryResourceRepository {
    kind: ResourceKind,
    records: RwLock<Vec<Resource>>,
}

impl MemoryResourceRepository {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            records: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ResourceRepository for MemoryResourceRepository {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    async fn list(&self) -> Result<Vec<Resource>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Resource>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, new: NewResource) -> Result<Resource, RepositoryError> {
        let mut records = self.records.write().await;

        // Allocated under the write lock; v4 collisions are not re-checked elsewhere.
        let mut id = Uuid::new_v4();
        while records.iter().any(|r| r.id == id) {
            id = Uuid::new_v4();
        }

        let now = Utc::now();
        let record = Resource {
            id,
            name: new.name,
            description: new.description,
            due_date: new.due_date,
            created_at: now,
            updated_at: now,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn remove(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }
}
