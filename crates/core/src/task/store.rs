//! Task store trait
//!
//! Defines the capabilities the repository needs from a backing store.
//! Opening or creating the store is the implementor's constructor.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Task, TaskCategory, TaskRecord};
use crate::Result;

/// Key-indexed record store with staged writes
///
/// Mutations are staged until [`commit`](TaskStore::commit). Queries only see
/// committed rows, and a failed commit discards the staged changes, so reads
/// never observe a write that did not reach the backing storage.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stage a new record
    async fn insert(&self, record: TaskRecord) -> Result<()>;

    /// All committed records, optionally only those whose category tag
    /// matches exactly
    async fn query(&self, category: Option<TaskCategory>) -> Result<Vec<TaskRecord>>;

    /// Overwrite the fields of the first record keyed by `id`
    ///
    /// Returns `false` when no record matches.
    async fn update(&self, id: Uuid, task: &Task) -> Result<bool>;

    /// Remove the first record keyed by `id`
    ///
    /// Returns `false` when no record matches.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Make staged changes durable; no-op when nothing is staged
    async fn commit(&self) -> Result<()>;

    /// Whether there are staged changes
    async fn has_changes(&self) -> bool;

    /// Whether any record is keyed by `id`
    async fn contains(&self, id: Uuid) -> Result<bool> {
        Ok(self.query(None).await?.iter().any(|r| r.has_id(id)))
    }
}

/// Committed and working copies of the rows, shared by store implementations
#[derive(Debug, Default)]
pub(crate) struct Rows {
    committed: Vec<TaskRecord>,
    working: Vec<TaskRecord>,
    dirty: bool,
}

impl Rows {
    pub(crate) fn new(records: Vec<TaskRecord>) -> Self {
        Self {
            committed: records.clone(),
            working: records,
            dirty: false,
        }
    }

    pub(crate) fn insert(&mut self, record: TaskRecord) {
        self.working.push(record);
        self.dirty = true;
    }

    pub(crate) fn query(&self, category: Option<TaskCategory>) -> Vec<TaskRecord> {
        match category {
            Some(category) => self
                .committed
                .iter()
                .filter(|r| r.category.as_deref() == Some(category.as_str()))
                .cloned()
                .collect(),
            None => self.committed.clone(),
        }
    }

    pub(crate) fn update(&mut self, id: Uuid, task: &Task) -> bool {
        let Some(record) = self.working.iter_mut().find(|r| r.has_id(id)) else {
            return false;
        };
        record.assign(task);
        self.dirty = true;
        true
    }

    pub(crate) fn delete(&mut self, id: Uuid) -> bool {
        let Some(index) = self.working.iter().position(|r| r.has_id(id)) else {
            return false;
        };
        self.working.remove(index);
        self.dirty = true;
        true
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn working(&self) -> &[TaskRecord] {
        &self.working
    }

    pub(crate) fn mark_committed(&mut self) {
        self.committed = self.working.clone();
        self.dirty = false;
    }

    pub(crate) fn rollback(&mut self) {
        self.working = self.committed.clone();
        self.dirty = false;
    }
}
