//! Core library for the personal task manager
//!
//! This crate contains the task persistence and query layer:
//! - Task entity, priority and category enumerations
//! - Input validation via the task factory
//! - Category filtering and priority sorting
//! - The task repository over a durable store
//! - Store session lifecycle

pub mod config;
pub mod error;
pub mod session;
pub mod task;

pub use config::StoreConfig;
pub use error::Error;
pub use session::{SessionWrite, StoreSession};
pub type Result<T> = std::result::Result<T, Error>;
