//! In-memory task storage
//!
//! Non-durable store for tests and ephemeral sessions. Commits only advance
//! the committed snapshot.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{Task, TaskCategory, TaskRecord};
use super::store::{Rows, TaskStore};
use crate::Result;

#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    rows: RwLock<Rows>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw rows, which need not decode
    pub fn with_records(records: Vec<TaskRecord>) -> Self {
        Self {
            rows: RwLock::new(Rows::new(records)),
        }
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, record: TaskRecord) -> Result<()> {
        self.rows.write().await.insert(record);
        Ok(())
    }

    async fn query(&self, category: Option<TaskCategory>) -> Result<Vec<TaskRecord>> {
        Ok(self.rows.read().await.query(category))
    }

    async fn update(&self, id: Uuid, task: &Task) -> Result<bool> {
        Ok(self.rows.write().await.update(id, task))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.rows.write().await.delete(id))
    }

    async fn commit(&self) -> Result<()> {
        let mut rows = self.rows.write().await;
        if rows.is_dirty() {
            rows.mark_committed();
        }
        Ok(())
    }

    async fn has_changes(&self) -> bool {
        self.rows.read().await.is_dirty()
    }
}
