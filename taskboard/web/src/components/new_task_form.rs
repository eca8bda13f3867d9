use dioxus::prelude::*;
use taskboard_client::TaskDraft;
use taskboard_core::NewTask;

/// Form for adding a task. The draft is owned by the caller so it can be
/// cleared once the server has accepted the task.
#[component]
pub fn NewTaskForm(draft: Signal<TaskDraft>, on_submit: EventHandler<NewTask>) -> Element {
    let mut draft = draft;
    let mut error = use_signal(|| None::<String>);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        match draft.read().to_new_task() {
            Ok(new_task) => {
                error.set(None);
                on_submit.call(new_task);
            }
            Err(e) => {
                let message = e.to_string();
                let _ = document::eval(&alert_script(&message));
                error.set(Some(message));
            }
        }
    };

    rsx! {
        form { class: "card new-task-form", onsubmit: handle_submit,
            h2 { "Add a task" }
            input {
                r#type: "text",
                placeholder: "Title",
                value: "{draft.read().title}",
                oninput: move |evt: FormEvent| {
                    draft.write().title = evt.value();
                    if error().is_some() {
                        error.set(None);
                    }
                },
            }
            textarea {
                placeholder: "Description (optional)",
                rows: 3,
                value: "{draft.read().description}",
                oninput: move |evt: FormEvent| draft.write().description = evt.value(),
            }
            if let Some(error_msg) = error() {
                p { class: "field-error", "{error_msg}" }
            }
            button { r#type: "submit", class: "primary", "Add Task" }
        }
    }
}

/// Script for a blocking browser alert showing `message`.
fn alert_script(message: &str) -> String {
    let literal = serde_json::to_string(message).unwrap_or_else(|_| "\"\"".to_string());
    format!("alert({literal});")
}
