use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner(message: String) -> Element {
    rsx! {
        div { class: "loading",
            div { class: "spinner" }
            p { "{message}" }
        }
    }
}
