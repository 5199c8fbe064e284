//! Store configuration
//!
//! Read from the environment:
//! - `PTM_DATA_DIR`: directory holding `tasks.json` (default `.ptm-data`)
//! - `PTM_IN_MEMORY`: use a non-durable store (default off)

use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "PTM_DATA_DIR";
pub const IN_MEMORY_ENV: &str = "PTM_IN_MEMORY";
pub const DEFAULT_DATA_DIR: &str = ".ptm-data";
pub const TASKS_FILE: &str = "tasks.json";

/// Which store a session opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// JSON file at the given path
    File(PathBuf),
    /// Isolated, non-durable store
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

impl StoreConfig {
    /// File store inside `data_dir`
    pub fn file(data_dir: impl AsRef<Path>) -> Self {
        Self {
            backend: StoreBackend::File(data_dir.as_ref().join(TASKS_FILE)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backend: StoreBackend::InMemory,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        if flag(lookup(IN_MEMORY_ENV).as_deref(), false) {
            return Self::in_memory();
        }
        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self::file(data_dir)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::file(DEFAULT_DATA_DIR)
    }
}

fn flag(raw: Option<&str>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}
