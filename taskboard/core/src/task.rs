use chrono::{DateTime, Utc};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier assigned to a task by the store.
pub type TaskId = u32;

/// Store-managed creation and update time.
pub type Timestamp = DateTime<Utc>;

/// A single to-do item as persisted by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub updated_at: Timestamp,
}

/// Input for creating a task. Missing fields fall back to their defaults,
/// a missing title becomes an empty one and fails validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewTask {
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub completed: bool,
}

/// Partial update of a task. Only the fields that are present are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TaskPatch {
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub title: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub completed: Option<bool>,
}

/// Response wrapper used by every successful API response: `{ "data": ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Envelope<T> {
    pub data: T,
}

/// Body returned after a task has been deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteConfirmation {
    pub id: TaskId,
    pub deleted: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Title is required")]
    TitleRequired,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

impl DeleteConfirmation {
    pub fn new(id: TaskId) -> Self {
        Self { id, deleted: true }
    }
}

/// A title counts as present when it has at least one non-whitespace character.
fn check_title(title: &str) -> Result<(), TaskError> {
    if title.trim().is_empty() {
        return Err(TaskError::TitleRequired);
    }
    Ok(())
}

impl NewTask {
    /// Creates a new, not yet completed task input.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }

    pub fn validate(&self) -> Result<(), TaskError> {
        check_title(&self.title)
    }
}

impl TaskPatch {
    /// Patch that flips the completion flag of `task` and leaves everything else alone.
    pub fn toggle_completed(task: &Task) -> Self {
        Self {
            completed: Some(!task.completed),
            ..Default::default()
        }
    }

    /// Returns true when the patch would not change any field.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// A patch may leave the title out, but it may not blank it.
    pub fn validate(&self) -> Result<(), TaskError> {
        match &self.title {
            Some(title) => check_title(title),
            None => Ok(()),
        }
    }
}

impl Task {
    /// Returns a copy of the task with the fields present in `patch` applied.
    /// Timestamps are left untouched; the store owns them.
    pub fn patched(&self, patch: &TaskPatch) -> Task {
        let mut task = self.clone();
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = description.clone();
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        task
    }
}
