use crate::components::{EditTaskDialog, ErrorMessage, LoadingSpinner, NewTaskForm, TaskCard};
use dioxus::prelude::*;
use taskboard_client::{TaskBoard, TaskClient, TaskDraft, TaskEdit};
use taskboard_core::{NewTask, Task, TaskId, TaskPatch};

/// The task list page: new task form, one card per task and the edit dialog.
#[component]
pub fn Home() -> Element {
    let client = use_signal(TaskClient::from_build_env);
    let board = use_signal(TaskBoard::new);
    let draft = use_signal(TaskDraft::default);
    let editing = use_signal(|| None::<TaskEdit>);
    let loading = use_signal(|| true);
    let error = use_signal(|| None::<String>);
    let mut actions = BoardActions {
        client,
        board,
        draft,
        editing,
        loading,
        error,
    };

    // Initial load of the list
    use_effect(move || {
        spawn(actions.load());
    });

    let tasks = board.read().tasks().to_vec();

    rsx! {
        main { class: "container",
            h1 { "Tasks" }

            if let Some(err) = error() {
                ErrorMessage { message: err, on_dismiss: move |_| actions.error.set(None) }
            }

            NewTaskForm {
                draft,
                on_submit: move |new_task: NewTask| {
                    spawn(actions.create(new_task));
                },
            }

            if loading() {
                LoadingSpinner { message: "Loading tasks...".to_string() }
            } else if tasks.is_empty() {
                p { class: "empty", "No tasks yet." }
            } else {
                ul { class: "task-list",
                    for task in tasks {
                        TaskCard {
                            key: "{task.id}",
                            task,
                            on_toggle: move |task: Task| {
                                spawn(actions.toggle(task));
                            },
                            on_edit: move |task: Task| actions.editing.set(Some(TaskEdit::from_task(&task))),
                            on_delete: move |id: TaskId| {
                                spawn(actions.delete(id));
                            },
                        }
                    }
                }
            }

            if let Some(edit) = editing() {
                EditTaskDialog {
                    edit,
                    on_save: move |edit: TaskEdit| {
                        spawn(actions.save(edit));
                    },
                    on_cancel: move |_| actions.editing.set(None),
                }
            }
        }
    }
}

/// Signals of the task page plus the round trips that update them. Local
/// state only changes after the server has answered.
#[derive(Clone, Copy)]
struct BoardActions {
    client: Signal<TaskClient>,
    board: Signal<TaskBoard>,
    draft: Signal<TaskDraft>,
    editing: Signal<Option<TaskEdit>>,
    loading: Signal<bool>,
    error: Signal<Option<String>>,
}

impl BoardActions {
    async fn load(mut self) {
        let client = self.client.peek().clone();
        match client.list_tasks().await {
            Ok(tasks) => self.board.write().replace_all(tasks),
            Err(e) => self.fail("Failed to load tasks", e),
        }
        self.loading.set(false);
    }

    async fn create(mut self, new_task: NewTask) {
        let client = self.client.peek().clone();
        match client.create_task(&new_task).await {
            Ok(task) => {
                self.board.write().insert_created(task);
                self.draft.write().clear();
                self.error.set(None);
            }
            Err(e) => self.fail("Failed to create task", e),
        }
    }

    async fn toggle(mut self, task: Task) {
        let client = self.client.peek().clone();
        match client
            .update_task(task.id, &TaskPatch::toggle_completed(&task))
            .await
        {
            Ok(updated) => {
                self.board.write().apply_updated(updated);
            }
            Err(e) => self.fail("Failed to update task", e),
        }
    }

    async fn save(mut self, edit: TaskEdit) {
        let client = self.client.peek().clone();
        match client.update_task(edit.id, &edit.draft.to_patch()).await {
            Ok(updated) => {
                self.board.write().apply_updated(updated);
                self.editing.set(None);
            }
            Err(e) => self.fail("Failed to update task", e),
        }
    }

    async fn delete(mut self, id: TaskId) {
        let client = self.client.peek().clone();
        match client.delete_task(id).await {
            Ok(confirmation) => {
                self.board.write().remove(confirmation.id);
            }
            Err(e) => self.fail("Failed to delete task", e),
        }
    }

    fn fail(&mut self, context: &str, e: impl std::fmt::Display) {
        tracing::error!("{}: {}", context, e);
        self.error.set(Some(format!("{context}: {e}")));
    }
}
