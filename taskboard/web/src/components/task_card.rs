use dioxus::prelude::*;
use taskboard_core::{Task, TaskId};

/// One task in the list with its completion toggle and edit/delete actions.
#[component]
pub fn TaskCard(
    task: Task,
    on_toggle: EventHandler<Task>,
    on_edit: EventHandler<Task>,
    on_delete: EventHandler<TaskId>,
) -> Element {
    let id = task.id;
    let toggled = task.clone();
    let edited = task.clone();
    let title_class = if task.completed { "title completed" } else { "title" };

    rsx! {
        li { class: "card task-card",
            input {
                r#type: "checkbox",
                checked: task.completed,
                onchange: move |_| on_toggle.call(toggled.clone()),
            }
            div { class: "task-body",
                span { class: "{title_class}", "{task.title}" }
                if !task.description.is_empty() {
                    p { class: "description", "{task.description}" }
                }
            }
            div { class: "task-actions",
                button {
                    r#type: "button",
                    onclick: move |_| on_edit.call(edited.clone()),
                    "Edit"
                }
                button {
                    r#type: "button",
                    class: "danger",
                    onclick: move |_| on_delete.call(id),
                    "Delete"
                }
            }
        }
    }
}
