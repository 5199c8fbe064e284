//! Error types for the core library

use thiserror::Error;

use crate::task::DecodeError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task with ID {0} already exists")]
    DuplicateTask(String),

    /// The task breaks the title or description rules.
    #[error("Invalid task: {0}")]
    InvalidTask(#[from] DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    /// The backing store could not be opened or initialized.
    #[error("Failed to open task store: {0}")]
    StoreOpen(String),

    /// Pending changes could not be written durably.
    #[error("Failed to commit task store: {0}")]
    Commit(String),
}

impl Error {
    /// Whether the durable substrate is broken and the host must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StoreOpen(_) | Self::Commit(_))
    }
}
