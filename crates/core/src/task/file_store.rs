//! File-based task storage implementation
//!
//! Stores task rows as a JSON array in a file on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{Task, TaskCategory, TaskRecord};
use super::store::{Rows, TaskStore};
use crate::{Error, Result};

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// Committed and staged rows
    rows: RwLock<Rows>,
}

impl FileTaskStore {
    /// Open the store at `path`
    ///
    /// If the file doesn't exist, it will be created on first commit. Rows
    /// that are not objects of the expected shape are dropped with a warning.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = if tokio::fs::try_exists(&path)
            .await
            .map_err(|e| Error::StoreOpen(format!("{}: {}", path.display(), e)))?
        {
            load_records(&path).await?
        } else {
            Vec::new()
        };

        tracing::debug!("Opened task store at {:?} with {} rows", path, records.len());

        Ok(Self {
            path,
            rows: RwLock::new(Rows::new(records)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the working rows to disk via a temp file and rename
    async fn persist(&self, records: &[TaskRecord]) -> Result<()> {
        let content = serde_json::to_string_pretty(records)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

async fn load_records(path: &Path) -> Result<Vec<TaskRecord>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::StoreOpen(format!("Failed to read {}: {}", path.display(), e)))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let raw: Vec<serde_json::Value> = serde_json::from_str(&content)
        .map_err(|e| Error::StoreOpen(format!("Failed to parse {}: {}", path.display(), e)))?;

    let total = raw.len();
    let records: Vec<TaskRecord> = raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();
    if records.len() < total {
        tracing::warn!(
            "Dropped {} unrepresentable rows while loading {:?}",
            total - records.len(),
            path
        );
    }
    Ok(records)
}

#[async_trait]
impl TaskStore for FileTaskStore {
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
        if !rows.is_dirty() {
            return Ok(());
        }

        let written = self.persist(rows.working()).await;
        match written {
            Ok(()) => {
                rows.mark_committed();
                Ok(())
            }
            Err(e) => {
                rows.rollback();
                tracing::error!("Commit to {:?} failed, staged changes discarded: {}", self.path, e);
                Err(Error::Commit(e.to_string()))
            }
        }
    }

    async fn has_changes(&self) -> bool {
        self.rows.read().await.is_dirty()
    }
}
