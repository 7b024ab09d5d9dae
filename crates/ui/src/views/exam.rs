use dioxus::prelude::*;
use exam_core::model::NavigationIntent;
use services::{CONTENT_REGION_ID, ConfirmDialog};

use crate::context::AppContext;
use crate::page::use_desktop_page;
use crate::views::{QuestionChart, SubmitDialog};
use crate::vm::map_chart;

#[component]
pub fn ExamView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = ctx.session();
    let page = use_desktop_page();
    let mut dialog = use_signal(|| None::<ConfirmDialog>);

    {
        let session = session.clone();
        use_future(move || {
            let session = session.clone();
            async move {
                session.open(&page).await;
            }
        });
    }

    let on_activate = {
        let session = session.clone();
        move |intent: NavigationIntent| {
            let session = session.clone();
            spawn(async move {
                session.navigate(&page, &intent).await;
            });
        }
    };

    let on_change = {
        let session = session.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            let session = session.clone();
            spawn(async move {
                session.select_option(&page, &value).await;
            });
        }
    };

    let open_dialog = {
        let session = session.clone();
        move |_: MouseEvent| {
            if dialog.read().is_none() {
                dialog.set(Some(session.request_submit()));
            }
        }
    };

    let on_confirm = move |()| {
        let open = dialog.write().take();
        if let Some(open) = open {
            spawn(async move {
                open.confirm(&page).await;
            });
        }
    };

    let on_cancel = move |()| {
        let open = dialog.write().take();
        if let Some(open) = open {
            open.cancel();
        }
    };

    let sections = map_chart(&page.board.read(), page.current.read().as_ref());
    let busy = *page.busy.read();
    let submit_enabled = *page.submit_enabled.read();
    let content = page.content.read().clone();
    let location = page
        .location
        .read()
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let course = session.course_id().to_string();
    let dialog_open = dialog.read().is_some();

    rsx! {
        div { class: "exam-layout", "data-course": "{course}", "data-location": "{location}",
            QuestionChart { sections, busy, on_activate }
            main { class: "exam-main",
                match content {
                    Some(html) => rsx! {
                        div { id: CONTENT_REGION_ID, onchange: on_change, dangerous_inner_html: "{html}" }
                    },
                    None => rsx! {
                        div { id: CONTENT_REGION_ID,
                            p { class: "muted", "Loading question..." }
                        }
                    },
                }
                div { class: "exam-actions",
                    button {
                        id: "exam-submit",
                        r#type: "button",
                        disabled: !submit_enabled,
                        onclick: open_dialog,
                        "Submit exam"
                    }
                }
            }
            if dialog_open {
                SubmitDialog { on_confirm, on_cancel }
            }
        }
    }
}
