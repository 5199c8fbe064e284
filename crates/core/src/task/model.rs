//! Task model definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

/// Maximum description length in user-perceived characters
pub const DESCRIPTION_MAX_CHARS: usize = 300;

/// Task priority level
///
/// Declaration order is the sort order: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [Self::Low, Self::Medium, Self::High];

    /// Numeric rank used for sorting
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Persisted string tag
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            other => Err(DecodeError::UnknownPriority(other.to_string())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task category, used as an exact-match filter key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskCategory {
    Personal,
    Work,
    Shopping,
    Other,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 4] = [Self::Personal, Self::Work, Self::Shopping, Self::Other];

    /// Persisted string tag
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Work => "Work",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }
}

impl FromStr for TaskCategory {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Personal" => Ok(Self::Personal),
            "Work" => Ok(Self::Work),
            "Shopping" => Ok(Self::Shopping),
            "Other" => Ok(Self::Other),
            other => Err(DecodeError::UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task tracked by the user
///
/// Built through [`TaskFactory`](super::TaskFactory), which guarantees a
/// trimmed non-empty title and a bounded description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub priority: TaskPriority,
    pub category: TaskCategory,
}

impl Task {
    /// Check the title and description invariants
    ///
    /// Tasks built by the factory always pass; hand-built ones may not.
    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.title.trim().is_empty() {
            return Err(DecodeError::BlankTitle);
        }
        let len = self.description.graphemes(true).count();
        if len > DESCRIPTION_MAX_CHARS {
            return Err(DecodeError::DescriptionTooLong(len));
        }
        Ok(())
    }

    /// Copy of this task with the completion flag flipped
    pub fn toggled(&self) -> Self {
        Self {
            is_completed: !self.is_completed,
            ..self.clone()
        }
    }
}

/// Reason a stored row could not be turned into a [`Task`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid id `{0}`")]
    InvalidId(String),

    #[error("priority `{0}` is not one of Low, Medium, High")]
    UnknownPriority(String),

    #[error("category `{0}` is not one of Personal, Work, Shopping, Other")]
    UnknownCategory(String),

    #[error("title is blank")]
    BlankTitle,

    #[error("description has {0} characters, more than 300")]
    DescriptionTooLong(usize),
}

/// One persisted row, as laid out in the backing store
///
/// Every field is optional so that incomplete rows survive loading and are
/// rejected at decode time instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub task_description: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl TaskRecord {
    /// Whether this row is keyed by `id`
    pub fn has_id(&self, id: Uuid) -> bool {
        self.id
            .as_deref()
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .is_some_and(|own| own == id)
    }

    /// Overwrite every field except the id
    pub fn assign(&mut self, task: &Task) {
        self.title = Some(task.title.clone());
        self.task_description = Some(task.description.clone());
        self.is_completed = Some(task.is_completed);
        self.priority = Some(task.priority.as_str().to_string());
        self.category = Some(task.category.as_str().to_string());
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        let mut record = Self {
            id: Some(task.id.to_string()),
            ..Self::default()
        };
        record.assign(task);
        record
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = DecodeError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let raw_id = record.id.ok_or(DecodeError::MissingField("id"))?;
        let id = Uuid::parse_str(&raw_id).map_err(|_| DecodeError::InvalidId(raw_id))?;
        let title = record.title.ok_or(DecodeError::MissingField("title"))?;
        let priority = record
            .priority
            .ok_or(DecodeError::MissingField("priority"))?
            .parse()?;
        let category = record
            .category
            .ok_or(DecodeError::MissingField("category"))?
            .parse()?;

        let task = Self {
            id,
            title,
            description: record.task_description.unwrap_or_default(),
            is_completed: record.is_completed.unwrap_or(false),
            priority,
            category,
        };
        task.validate()?;
        Ok(task)
    }
}
