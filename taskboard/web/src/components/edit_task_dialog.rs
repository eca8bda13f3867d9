use dioxus::prelude::*;
use taskboard_client::TaskEdit;

/// Modal for editing every field of a task.
#[component]
pub fn EditTaskDialog(
    edit: TaskEdit,
    on_save: EventHandler<TaskEdit>,
    on_cancel: EventHandler<()>,
) -> Element {
    let id = edit.id;
    let mut draft = use_signal(|| edit.draft.clone());
    let mut error = use_signal(|| None::<String>);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let current = draft();
        if let Err(e) = current.to_new_task() {
            error.set(Some(e.to_string()));
            return;
        }
        error.set(None);
        on_save.call(TaskEdit { id, draft: current });
    };

    rsx! {
        div {
            class: "overlay",
            onclick: move |_| on_cancel.call(()),

            div {
                class: "card dialog",
                onclick: move |evt| evt.stop_propagation(),

                h2 { "Edit Task" }

                form { onsubmit: handle_submit,
                    label { "Title"
                        input {
                            r#type: "text",
                            value: "{draft.read().title}",
                            oninput: move |evt: FormEvent| draft.write().title = evt.value(),
                            autofocus: true,
                        }
                    }
                    label { "Description"
                        textarea {
                            rows: 3,
                            value: "{draft.read().description}",
                            oninput: move |evt: FormEvent| draft.write().description = evt.value(),
                        }
                    }
                    label { class: "inline",
                        input {
                            r#type: "checkbox",
                            checked: draft.read().completed,
                            onchange: move |evt: FormEvent| draft.write().completed = evt.checked(),
                        }
                        "Completed"
                    }

                    if let Some(error_msg) = error() {
                        p { class: "field-error", "{error_msg}" }
                    }

                    div { class: "dialog-actions",
                        button {
                            r#type: "button",
                            onclick: move |_| on_cancel.call(()),
                            "Cancel"
                        }
                        button { r#type: "submit", class: "primary", "Save Changes" }
                    }
                }
            }
        }
    }
}
