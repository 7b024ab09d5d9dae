use dioxus::prelude::*;

use crate::views::ExamView;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Title { "Exam" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                ExamView {}
            }
        }
    }
}
