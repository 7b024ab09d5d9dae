use dioxus::prelude::*;

#[component]
pub fn SubmitDialog(on_confirm: EventHandler<()>, on_cancel: EventHandler<()>) -> Element {
    rsx! {
        div { class: "modal-backdrop",
            div {
                class: "modal",
                role: "dialog",
                "aria-modal": "true",
                "aria-labelledby": "submit-dialog-title",
                h3 { id: "submit-dialog-title", "Submit exam?" }
                p { "Answers cannot be changed after submitting." }
                div { class: "modal-actions",
                    button {
                        id: "submit-dialog-cancel",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        id: "submit-dialog-confirm",
                        r#type: "button",
                        class: "primary",
                        onclick: move |_| on_confirm.call(()),
                        "Submit"
                    }
                }
            }
        }
    }
}
