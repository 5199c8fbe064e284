//! Task factory
//!
//! Turns raw form input into a canonical [`Task`].

use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

use super::model::{Task, TaskCategory, TaskPriority, DESCRIPTION_MAX_CHARS};

pub struct TaskFactory;

impl TaskFactory {
    /// Build a task from user input
    ///
    /// Returns `None` when the title is absent or blank after trimming. When
    /// `prior` is given the result keeps its id and completion flag,
    /// otherwise a fresh id is generated and the task starts incomplete.
    pub fn make_task(
        title: Option<&str>,
        description: Option<&str>,
        prior: Option<&Task>,
        priority: TaskPriority,
        category: TaskCategory,
    ) -> Option<Task> {
        Self::build(title, description, prior, priority, category, Uuid::new_v4)
    }

    /// Create path with a caller-supplied id instead of a generated one
    pub fn make_task_with_id(
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        priority: TaskPriority,
        category: TaskCategory,
    ) -> Option<Task> {
        Self::build(title, description, None, priority, category, || id)
    }

    fn build(
        title: Option<&str>,
        description: Option<&str>,
        prior: Option<&Task>,
        priority: TaskPriority,
        category: TaskCategory,
        new_id: impl FnOnce() -> Uuid,
    ) -> Option<Task> {
        let title = title.map(str::trim).filter(|t| !t.is_empty())?;

        let (id, is_completed) = match prior {
            Some(prior) => (prior.id, prior.is_completed),
            None => (new_id(), false),
        };

        Some(Task {
            id,
            title: title.to_string(),
            description: truncate_description(description.unwrap_or_default()),
            is_completed,
            priority,
            category,
        })
    }
}

fn truncate_description(text: &str) -> String {
    match text.grapheme_indices(true).nth(DESCRIPTION_MAX_CHARS) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
