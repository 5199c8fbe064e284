//! Store session
//!
//! Owns the handle to the backing store. The store is opened on first use
//! and reused for the lifetime of the session. Sessions are passed to the
//! repository explicitly; tests build an isolated in-memory session each.
//!
//! All mutations of a session's store go through [`StoreSession::write`],
//! which serializes writers across every repository sharing the session.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard, OnceCell};

use crate::config::{StoreBackend, StoreConfig};
use crate::task::{FileTaskStore, MemoryTaskStore, TaskStore};
use crate::{Error, Result};

pub struct StoreSession {
    /// `None` when the store was injected already open
    config: Option<StoreConfig>,
    store: OnceCell<Arc<dyn TaskStore>>,
    writes: Mutex<()>,
}

/// Exclusive write access to a session's store
///
/// Stage changes through [`store`](SessionWrite::store) and finish with
/// [`commit`](SessionWrite::commit) before dropping. No other writer on the
/// session can stage or commit in between.
pub struct SessionWrite<'a> {
    store: Arc<dyn TaskStore>,
    _guard: MutexGuard<'a, ()>,
}

impl SessionWrite<'_> {
    pub fn store(&self) -> &dyn TaskStore {
        self.store.as_ref()
    }

    /// Commit staged changes; no-op when nothing is staged
    pub async fn commit(&self) -> Result<()> {
        if !self.store.has_changes().await {
            return Ok(());
        }
        self.store.commit().await
    }
}

impl StoreSession {
    /// Session that opens the configured store lazily
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config: Some(config),
            store: OnceCell::new(),
            writes: Mutex::new(()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(StoreConfig::from_env())
    }

    /// Session over a fresh, isolated in-memory store
    pub fn in_memory() -> Self {
        Self::new(StoreConfig::in_memory())
    }

    /// Session over an already opened store
    pub fn with_store(store: Arc<dyn TaskStore>) -> Self {
        Self {
            config: None,
            store: OnceCell::from(store),
            writes: Mutex::new(()),
        }
    }

    /// Configuration the store is opened from, if it was not injected
    pub fn config(&self) -> Option<&StoreConfig> {
        self.config.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.store.initialized()
    }

    /// The store handle, opening it on first access
    ///
    /// An open failure is fatal for the host: the returned
    /// [`Error::StoreOpen`] must not be retried around.
    pub async fn store(&self) -> Result<Arc<dyn TaskStore>> {
        let store = self
            .store
            .get_or_try_init(|| async {
                match &self.config {
                    Some(config) => open_store(config).await,
                    None => Err(Error::StoreOpen("no store configured".to_string())),
                }
            })
            .await
            .inspect_err(|e| tracing::error!("Task store unavailable: {}", e))?;
        Ok(Arc::clone(store))
    }

    /// Lock the session for writing, opening the store if needed
    pub async fn write(&self) -> Result<SessionWrite<'_>> {
        let guard = self.writes.lock().await;
        let store = self.store().await?;
        Ok(SessionWrite {
            store,
            _guard: guard,
        })
    }

    /// Commit pending changes; no-op when nothing is pending
    pub async fn persist(&self) -> Result<()> {
        if !self.is_open() {
            return Ok(());
        }
        self.write().await?.commit().await
    }
}

async fn open_store(config: &StoreConfig) -> Result<Arc<dyn TaskStore>> {
    match &config.backend {
        StoreBackend::File(path) => {
            tracing::info!("Opening task store at {:?}", path);
            let store = FileTaskStore::open(path.clone()).await.map_err(|e| match e {
                Error::StoreOpen(_) => e,
                other => Error::StoreOpen(other.to_string()),
            })?;
            Ok(Arc::new(store))
        }
        StoreBackend::InMemory => Ok(Arc::new(MemoryTaskStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskCategory, TaskFactory, TaskPriority, TaskRecord};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_store_opened_lazily_and_reused() {
        let session = StoreSession::in_memory();
        assert!(!session.is_open());

        let first = session.store().await.unwrap();
        assert!(session.is_open());
        let second = session.store().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_in_memory_sessions_are_isolated() {
        let a = StoreSession::in_memory();
        let b = StoreSession::in_memory();
        let task = TaskFactory::make_task(
            Some("Only in A"),
            None,
            None,
            TaskPriority::Low,
            TaskCategory::Other,
        )
        .unwrap();

        let write = a.write().await.unwrap();
        write.store().insert(TaskRecord::from(&task)).await.unwrap();
        write.commit().await.unwrap();
        drop(write);

        assert_eq!(a.store().await.unwrap().query(None).await.unwrap().len(), 1);
        assert!(b.store().await.unwrap().query(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persist_is_noop_without_changes() {
        let temp_dir = TempDir::new().unwrap();
        let session = StoreSession::new(StoreConfig::file(temp_dir.path()));

        // Not opened yet
        session.persist().await.unwrap();
        assert!(!session.is_open());

        session.store().await.unwrap();
        session.persist().await.unwrap();
        assert!(!temp_dir.path().join("tasks.json").exists());
    }

    #[tokio::test]
    async fn test_persist_commits_pending_changes() {
        let temp_dir = TempDir::new().unwrap();
        let session = StoreSession::new(StoreConfig::file(temp_dir.path()));
        let task = TaskFactory::make_task(
            Some("Flush me"),
            None,
            None,
            TaskPriority::Medium,
            TaskCategory::Work,
        )
        .unwrap();

        let store = session.store().await.unwrap();
        store.insert(TaskRecord::from(&task)).await.unwrap();
        assert!(store.has_changes().await);
        session.persist().await.unwrap();
        assert!(!store.has_changes().await);
        assert!(temp_dir.path().join("tasks.json").exists());
    }

    #[tokio::test]
    async fn test_open_failure_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("tasks.json"), "corrupt").unwrap();
        let session = StoreSession::new(StoreConfig::file(temp_dir.path()));

        let err = session.store().await.err().unwrap();
        assert!(matches!(err, Error::StoreOpen(_)));
        assert!(err.is_fatal());
        assert!(!session.is_open());
    }

    #[tokio::test]
    async fn test_with_store_injects_handle() {
        let store: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());
        let session = StoreSession::with_store(Arc::clone(&store));
        assert!(session.is_open());
        assert!(session.config().is_none());
        assert!(Arc::ptr_eq(&session.store().await.unwrap(), &store));
    }

    #[tokio::test]
    async fn test_config_reported_for_lazy_sessions() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::file(temp_dir.path());
        let session = StoreSession::new(config.clone());
        assert_eq!(session.config(), Some(&config));
    }

    #[tokio::test]
    async fn test_writers_are_serialized() {
        let session = StoreSession::in_memory();
        let first = session.write().await.unwrap();

        // A second writer waits until the first is dropped
        let blocked = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            session.write(),
        )
        .await;
        assert!(blocked.is_err());

        drop(first);
        assert!(session.write().await.is_ok());
    }
}
