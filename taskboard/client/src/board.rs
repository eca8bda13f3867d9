//! Local mirror of the server's task list.
//!
//! The mirror is only ever changed from server responses: a create, update or
//! delete first completes its round trip, then the result is folded in here.
//! Responses may arrive in any order; whichever is applied last wins.

use taskboard_core::{NewTask, Task, TaskError, TaskId, TaskPatch};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Replaces the whole mirror, used after the initial fetch.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Newly created tasks are shown first.
    pub fn insert_created(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Replaces the task with the same ID. Returns false when the task is not
    /// in the mirror, e.g. because a delete response was applied first.
    pub fn apply_updated(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => {
                *existing = task;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }
}

/// Form state of the "new task" form and of the edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
        }
    }

    /// Validated create input; a blank title is refused here so the UI never
    /// sends it.
    pub fn to_new_task(&self) -> Result<NewTask, TaskError> {
        let new_task = NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
        };
        new_task.validate()?;
        Ok(new_task)
    }

    /// Patch carrying every field of the draft, as submitted by the edit dialog.
    pub fn to_patch(&self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            completed: Some(self.completed),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A task currently open in the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub id: TaskId,
    pub draft: TaskDraft,
}

impl TaskEdit {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            draft: TaskDraft::from_task(task),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::Timestamp;

    fn task(id: TaskId, title: &str) -> Task {
        let now = Timestamp::default();
        Task {
            id,
            title: title.to_string(),
            description: String::new(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn can_replace_all_tasks_after_fetch() {
        let mut board = TaskBoard::new();
        board.replace_all(vec![task(1, "One"), task(2, "Two")]);

        assert_eq!(board.len(), 2);
        assert_eq!(board.tasks()[0].id, 1);
        assert_eq!(board.tasks()[1].id, 2);
    }

    #[test]
    fn can_show_created_task_first() {
        let mut board = TaskBoard::new();
        board.replace_all(vec![task(1, "One")]);
        board.insert_created(task(2, "Two"));

        let ids: Vec<TaskId> = board.tasks().iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn can_apply_updated_task_in_place() {
        let mut board = TaskBoard::new();
        board.replace_all(vec![task(1, "One"), task(2, "Two")]);

        let mut updated = task(2, "Two");
        updated.completed = true;
        assert!(board.apply_updated(updated.clone()));

        assert_eq!(board.get(2), Some(&updated));
        assert_eq!(board.get(1).map(|task| task.completed), Some(false));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn can_ignore_update_for_task_no_longer_shown() {
        let mut board = TaskBoard::new();
        board.replace_all(vec![task(1, "One")]);

        assert!(!board.apply_updated(task(5, "Gone")));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn can_remove_deleted_task() {
        let mut board = TaskBoard::new();
        board.replace_all(vec![task(1, "One"), task(2, "Two")]);

        let removed = board.remove(1);

        assert_eq!(removed.map(|task| task.title), Some("One".to_string()));
        assert!(board.get(1).is_none());
        assert_eq!(board.remove(1), None);
    }

    #[test]
    fn can_let_last_applied_response_win() {
        let mut board = TaskBoard::new();
        board.replace_all(vec![task(1, "Original")]);

        board.apply_updated(task(1, "Second edit"));
        board.apply_updated(task(1, "First edit"));

        assert_eq!(board.get(1).map(|task| task.title.as_str()), Some("First edit"));
    }

    #[test]
    fn can_refuse_draft_with_blank_title() {
        let draft = TaskDraft {
            title: "   ".to_string(),
            description: "Something".to_string(),
            completed: false,
        };
        assert_eq!(draft.to_new_task(), Err(TaskError::TitleRequired));
    }

    #[test]
    fn can_turn_draft_into_new_task() {
        let draft = TaskDraft {
            title: "Plan sprint".to_string(),
            description: "Monday".to_string(),
            completed: false,
        };
        assert_eq!(
            draft.to_new_task(),
            Ok(NewTask::new("Plan sprint", "Monday"))
        );
    }

    #[test]
    fn can_build_full_patch_from_edit() {
        let mut original = task(3, "Draft");
        original.description = "notes".to_string();
        let mut edit = TaskEdit::from_task(&original);
        edit.draft.completed = true;

        assert_eq!(edit.id, 3);
        assert_eq!(
            edit.draft.to_patch(),
            TaskPatch {
                title: Some("Draft".to_string()),
                description: Some("notes".to_string()),
                completed: Some(true),
            }
        );
    }

    #[test]
    fn can_clear_draft_after_create() {
        let mut draft = TaskDraft {
            title: "x".to_string(),
            description: "y".to_string(),
            completed: true,
        };
        draft.clear();
        assert_eq!(draft, TaskDraft::default());
    }
}
