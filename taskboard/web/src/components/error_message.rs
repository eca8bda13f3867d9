use dioxus::prelude::*;

/// An error message component for displaying failed requests
#[component]
pub fn ErrorMessage(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div { class: "error-message", role: "alert",
            p { "{message}" }
            button {
                r#type: "button",
                class: "link-button",
                onclick: move |_| on_dismiss.call(()),
                "Dismiss"
            }
        }
    }
}
