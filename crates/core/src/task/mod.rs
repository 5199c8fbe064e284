//! Task module
//!
//! This module contains task-related types and logic.

mod collection;
mod factory;
mod file_store;
mod memory_store;
mod model;
mod repository;
mod store;

pub use collection::{filtered, sorted_by_priority};
pub use factory::TaskFactory;
pub use file_store::FileTaskStore;
pub use memory_store::MemoryTaskStore;
pub use model::*;
pub use repository::TaskRepository;
pub use store::TaskStore;
