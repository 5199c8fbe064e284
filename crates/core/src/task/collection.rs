//! Query operations over task lists

use std::cmp::Reverse;

use super::model::{Task, TaskCategory};

/// Highest priority first; equal priorities keep their input order
pub fn sorted_by_priority(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    // sort_by_key is stable
    sorted.sort_by_key(|task| Reverse(task.priority.rank()));
    sorted
}

/// Tasks in `category`, or all tasks when no category is given
pub fn filtered(tasks: &[Task], category: Option<TaskCategory>) -> Vec<Task> {
    match category {
        Some(category) => tasks
            .iter()
            .filter(|task| task.category == category)
            .cloned()
            .collect(),
        None => tasks.to_vec(),
    }
}
