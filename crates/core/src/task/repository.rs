//! Task repository
//!
//! CRUD façade over the session's store, keyed by task id.

use std::sync::Arc;

use super::collection::sorted_by_priority;
use super::model::{Task, TaskCategory};
use crate::session::StoreSession;
use crate::{Error, Result};

/// Repository for task CRUD operations
///
/// Each public call is one atomic unit: writes are staged and committed
/// under the session's write lock, shared with every other repository on
/// the same session, and a failed commit leaves the store as it was.
pub struct TaskRepository {
    session: Arc<StoreSession>,
}

impl TaskRepository {
    pub fn new(session: Arc<StoreSession>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<StoreSession> {
        &self.session
    }

    /// Fetch tasks, optionally only one category and optionally by priority
    ///
    /// Rows that do not decode are skipped. A read failure yields an empty
    /// list; only a fatal store-open failure is returned as an error.
    pub async fn fetch(
        &self,
        category: Option<TaskCategory>,
        sort_by_priority: bool,
    ) -> Result<Vec<Task>> {
        let store = self.session.store().await?;
        let records = match store.query(category).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Failed to load tasks: {}", e);
                return Ok(Vec::new());
            }
        };

        let total = records.len();
        let mut tasks = Vec::with_capacity(total);
        for record in records {
            match Task::try_from(record) {
                Ok(task) => tasks.push(task),
                Err(e) => tracing::debug!("Skipping task record: {}", e),
            }
        }
        if tasks.len() < total {
            tracing::warn!("Skipped {} undecodable task records", total - tasks.len());
        }

        if sort_by_priority {
            tasks = sorted_by_priority(&tasks);
        }
        Ok(tasks)
    }

    /// Insert a new task
    ///
    /// Fails with [`Error::InvalidTask`] if the title is blank or the
    /// description too long, and with [`Error::DuplicateTask`] if the id is
    /// already stored.
    pub async fn save(&self, task: &Task) -> Result<()> {
        task.validate()?;
        let write = self.session.write().await?;

        if write.store().contains(task.id).await? {
            return Err(Error::DuplicateTask(task.id.to_string()));
        }
        write.store().insert(task.into()).await?;
        write.commit().await?;

        tracing::debug!("Saved task {}", task.id);
        Ok(())
    }

    /// Overwrite every field but the id of the stored task with `task.id`
    ///
    /// Returns `false`, touching nothing, when no such task is stored.
    /// Fails with [`Error::InvalidTask`] like [`save`](Self::save).
    pub async fn update(&self, task: &Task) -> Result<bool> {
        task.validate()?;
        let write = self.session.write().await?;

        if !write.store().update(task.id, task).await? {
            tracing::debug!("Update skipped, task {} not found", task.id);
            return Ok(false);
        }
        write.commit().await?;

        tracing::debug!("Updated task {}", task.id);
        Ok(true)
    }

    /// Remove the stored task with `task.id`
    ///
    /// Returns `false` when no such task is stored.
    pub async fn delete(&self, task: &Task) -> Result<bool> {
        let write = self.session.write().await?;

        if !write.store().delete(task.id).await? {
            tracing::debug!("Delete skipped, task {} not found", task.id);
            return Ok(false);
        }
        write.commit().await?;

        tracing::debug!("Deleted task {}", task.id);
        Ok(true)
    }
}
