use dioxus::prelude::*;
use exam_core::model::{QuestionId, QuestionStatusMap, TileBoard};
use storage::KeyValueRepository;

use super::test_harness::{
    ChartHarness, ChartHarnessProps, DialogHarness, StubApi, drive_dom, physics_snapshot,
    question_page, setup_exam_harness,
};
use crate::vm::map_chart;

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_opens_first_question() {
    let mut harness = setup_exam_harness(StubApi {
        page: Some(question_page("Q3", 3)),
        snapshot: physics_snapshot(4),
    })
    .await;
    harness.rebuild();
    for _ in 0..3 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("Question 3"), "missing content in {html}");
    assert!(
        html.contains("qc-tile q-visited q-current"),
        "missing current tile in {html}"
    );
    assert!(
        html.contains("Question 1, Unvisited"),
        "missing tile label in {html}"
    );
    assert!(html.contains(r#"aria-busy="false""#), "missing busy marker in {html}");
    assert!(html.contains(r#"data-course="C1""#), "missing course in {html}");

    let raw = harness
        .repo
        .get("exam_visited_C1")
        .await
        .unwrap()
        .unwrap_or_default();
    let visited = QuestionStatusMap::from_json(&raw).unwrap();
    assert!(visited.contains(&QuestionId::new("Q3").unwrap()));
    assert_eq!(
        harness.session.current_question(),
        Some(QuestionId::new("Q3").unwrap())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_keeps_placeholder_when_start_page_fails() {
    let mut harness = setup_exam_harness(StubApi {
        page: None,
        snapshot: physics_snapshot(2),
    })
    .await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Loading question..."), "missing placeholder in {html}");
    assert!(!html.contains("qc-tile"), "unexpected tiles in {html}");
}

#[test]
fn chart_smoke_renders_sections_and_drawer_toggle() {
    let mut visited = QuestionStatusMap::new();
    visited.mark(QuestionId::new("Q2").unwrap());
    let board = TileBoard::build(&physics_snapshot(3), &visited, &QuestionStatusMap::new(), None);

    let mut dom = VirtualDom::new_with_props(
        ChartHarness,
        ChartHarnessProps {
            sections: map_chart(&board, None),
            busy: true,
        },
    );
    dom.rebuild_in_place();
    drive_dom(&mut dom);
    let html = dioxus_ssr::render(&dom);

    assert!(html.contains("Physics"), "missing section in {html}");
    assert!(html.contains(">3 Qs<"), "missing section count in {html}");
    assert!(html.contains(r#"aria-busy="true""#), "missing busy marker in {html}");
    assert!(html.contains(r#"aria-expanded="false""#), "missing toggle state in {html}");
    assert!(html.contains(">Open<"), "missing toggle label in {html}");
    assert!(html.contains(r#"data-qid="Q2""#), "missing tile data in {html}");
    assert!(html.contains(r#"data-sec="Physics""#), "missing tile data in {html}");
    assert!(html.contains("Q2: Visited (No Answer)"), "missing title in {html}");
}

#[test]
fn dialog_smoke_renders_actions() {
    let mut dom = VirtualDom::new(DialogHarness);
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Submit exam?"), "missing title in {html}");
    assert!(html.contains("submit-dialog-confirm"), "missing confirm in {html}");
    assert!(html.contains("submit-dialog-cancel"), "missing cancel in {html}");
}
