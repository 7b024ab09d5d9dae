use dioxus::prelude::*;
use exam_core::model::NavigationIntent;

use crate::vm::{ChartSectionVm, TileVm, drawer_toggle_label};

/// Sidebar grid of question tiles, grouped by section, behind a drawer toggle
/// for narrow windows.
#[component]
pub fn QuestionChart(
    sections: Vec<ChartSectionVm>,
    busy: bool,
    on_activate: EventHandler<NavigationIntent>,
) -> Element {
    let mut drawer_open = use_signal(|| false);
    let open = drawer_open();
    let drawer_class = if open { "qc-drawer open" } else { "qc-drawer" };

    rsx! {
        aside { class: "question-chart",
            button {
                id: "qc-drawer-toggle",
                r#type: "button",
                "aria-controls": "qc-sections",
                "aria-expanded": "{open}",
                onclick: move |_| drawer_open.set(!open),
                "{drawer_toggle_label(open)}"
            }
            div { id: "qc-sections", class: "{drawer_class}", "aria-busy": "{busy}",
                for group in sections {
                    section { key: "{group.name}", class: "qc-section",
                        h4 { class: "qc-section-title",
                            span { "{group.name}" }
                            span { class: "qc-count", "{group.count_label}" }
                        }
                        div { class: "qc-grid",
                            for tile in group.tiles {
                                QuestionTile { key: "{tile.id}", tile, on_activate }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionTile(tile: TileVm, on_activate: EventHandler<NavigationIntent>) -> Element {
    let on_click = tile.intent();
    let on_enter = tile.intent();

    rsx! {
        div {
            class: "{tile.class}",
            role: "button",
            tabindex: "0",
            "data-qid": "{tile.id}",
            "data-qnum": "{tile.number}",
            "data-sec": "{tile.section}",
            "aria-label": "{tile.aria_label}",
            title: "{tile.title}",
            onclick: move |_| on_activate.call(on_click.clone()),
            onkeydown: move |evt: KeyboardEvent| {
                if evt.key() == Key::Enter {
                    evt.prevent_default();
                    on_activate.call(on_enter.clone());
                }
            },
            "{tile.number}"
        }
    }
}
