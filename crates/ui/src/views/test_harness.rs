use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use exam_core::model::{QuestionId, QuestionSnapshot, QuestionStatus, SectionSnapshot, StatusSnapshot};
use services::{ExamApi, ExamApiError, ExamConfig, ExamSession};
use storage::InMemoryRepository;
use url::Url;

use crate::context::{UiApp, build_app_context};
use crate::views::{ExamView, QuestionChart, SubmitDialog};
use crate::vm::ChartSectionVm;

/// Serves the same question page for every fetch.
pub struct StubApi {
    pub page: Option<String>,
    pub snapshot: StatusSnapshot,
}

#[async_trait]
impl ExamApi for StubApi {
    async fn fetch_statuses(&self, _url: &Url) -> Result<StatusSnapshot, ExamApiError> {
        Ok(self.snapshot.clone())
    }

    async fn fetch_page(&self, _url: &Url) -> Result<String, ExamApiError> {
        self.page
            .clone()
            .ok_or(ExamApiError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY))
    }

    async fn save_answer(
        &self,
        _url: &Url,
        _fields: &[(&'static str, String)],
    ) -> Result<(), ExamApiError> {
        Ok(())
    }
}

pub fn physics_snapshot(count: u32) -> StatusSnapshot {
    StatusSnapshot {
        sections: vec![SectionSnapshot {
            name: "Physics".into(),
            count: Some(count),
            questions: (1..=count)
                .map(|number| QuestionSnapshot {
                    id: QuestionId::new(format!("Q{number}")).expect("question id"),
                    number,
                    status: QuestionStatus::Unanswered,
                    is_current: false,
                })
                .collect(),
        }],
    }
}

pub fn question_page(question_id: &str, number: u32) -> String {
    format!(
        r#"<html><body><div id="exam-left-panel">
             <h3>Question {number}</h3>
             <form method="post" data-question-id="{question_id}">
               <input type="hidden" name="csrfmiddlewaretoken" value="tok">
               <input type="hidden" name="current_q_index" value="{number}">
               <label><input type="radio" name="selected_option" value="A"> A</label>
               <label><input type="radio" name="selected_option" value="B"> B</label>
             </form>
           </div></body></html>"#
    )
}

#[derive(Clone)]
struct TestApp {
    session: ExamSession,
}

impl UiApp for TestApp {
    fn exam_session(&self) -> ExamSession {
        self.session.clone()
    }
}

#[derive(Props, Clone)]
struct ExamHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ExamHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ExamHarness(props: ExamHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { ExamView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
    pub session: ExamSession,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_exam_harness(api: StubApi) -> ViewHarness {
    let repo = InMemoryRepository::new();
    let config = ExamConfig::new("C1", "http://exam.local", "/exam/C1/start/").expect("config");
    let session = ExamSession::new(config, Arc::new(api), Arc::new(repo.clone())).await;
    let app = Arc::new(TestApp {
        session: session.clone(),
    });
    let dom = VirtualDom::new_with_props(ExamHarness, ExamHarnessProps { app });
    ViewHarness { dom, repo, session }
}

#[derive(Props, Clone, PartialEq)]
pub struct ChartHarnessProps {
    pub sections: Vec<ChartSectionVm>,
    pub busy: bool,
}

#[component]
pub fn ChartHarness(props: ChartHarnessProps) -> Element {
    rsx! {
        QuestionChart { sections: props.sections, busy: props.busy, on_activate: move |_| {} }
    }
}

#[component]
pub fn DialogHarness() -> Element {
    rsx! {
        SubmitDialog { on_confirm: move |()| {}, on_cancel: move |()| {} }
    }
}
