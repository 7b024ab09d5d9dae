#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use exam_core::model::{QuestionId, QuestionSnapshot, QuestionStatus, SectionSnapshot, StatusSnapshot};
use services::{ExamApi, ExamApiError, ExamConfig, ExamSession};
use storage::InMemoryRepository;
use url::Url;

pub const BASE: &str = "http://exam.local";
pub const START: &str = "http://exam.local/exam/C1/start/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Statuses(String),
    Page(String),
    Save(Vec<(String, String)>),
}

/// `ExamApi` fake answering from canned pages and a canned snapshot.
#[derive(Default)]
pub struct ScriptedApi {
    pages: Mutex<HashMap<String, String>>,
    snapshot: Mutex<Option<StatusSnapshot>>,
    fail_saves: Mutex<bool>,
    page_delays: Mutex<HashMap<String, Duration>>,
    status_delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_page(&self, url: &str, html: impl Into<String>) {
        self.pages.lock().unwrap().insert(url.to_string(), html.into());
    }

    pub fn with_snapshot(&self, snapshot: StatusSnapshot) {
        *self.snapshot.lock().unwrap() = Some(snapshot);
    }

    /// Hold the response for `url` for `delay` before answering.
    pub fn delay_page(&self, url: &str, delay: Duration) {
        self.page_delays.lock().unwrap().insert(url.to_string(), delay);
    }

    pub fn delay_statuses(&self, delay: Duration) {
        *self.status_delay.lock().unwrap() = Some(delay);
    }

    pub fn fail_saves(&self) {
        *self.fail_saves.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn saves(&self) -> Vec<Vec<(String, String)>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::Save(fields) => Some(fields),
                _ => None,
            })
            .collect()
    }

    pub fn status_fetches(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ApiCall::Statuses(_)))
            .count()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ExamApi for ScriptedApi {
    async fn fetch_statuses(&self, url: &Url) -> Result<StatusSnapshot, ExamApiError> {
        self.record(ApiCall::Statuses(url.to_string()));
        let delay = *self.status_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.snapshot
            .lock()
            .unwrap()
            .clone()
            .ok_or(ExamApiError::HttpStatus(reqwest::StatusCode::SERVICE_UNAVAILABLE))
    }

    async fn fetch_page(&self, url: &Url) -> Result<String, ExamApiError> {
        self.record(ApiCall::Page(url.to_string()));
        let delay = self.page_delays.lock().unwrap().get(url.as_str()).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.pages
            .lock()
            .unwrap()
            .get(url.as_str())
            .cloned()
            .ok_or(ExamApiError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY))
    }

    async fn save_answer(
        &self,
        _url: &Url,
        fields: &[(&'static str, String)],
    ) -> Result<(), ExamApiError> {
        self.record(ApiCall::Save(
            fields
                .iter()
                .map(|(name, value)| ((*name).to_string(), value.clone()))
                .collect(),
        ));
        if *self.fail_saves.lock().unwrap() {
            return Err(ExamApiError::HttpStatus(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(())
    }
}

pub fn qid(raw: &str) -> QuestionId {
    QuestionId::new(raw).unwrap()
}

/// A question page whose form carries `question_id` and `index`.
pub fn question_page(question_id: &str, index: u32, checked: Option<&str>) -> String {
    let option = |value: &str| {
        let checked = if checked == Some(value) { " checked" } else { "" };
        format!(r#"<label><input type="radio" name="selected_option" value="{value}"{checked}> {value}</label>"#)
    };
    format!(
        r#"<html><body>
          <div id="exam-left-panel">
            <h3>Question {index}</h3>
            <form method="post" data-question-id="{question_id}">
              <input type="hidden" name="csrfmiddlewaretoken" value="tok">
              <input type="hidden" name="current_q_index" value="{index}">
              <input type="hidden" name="active_subject" value="Physics">
              <input type="hidden" name="course_id" value="C1">
              {a}{b}
            </form>
          </div>
        </body></html>"#,
        a = option("A"),
        b = option("B"),
    )
}

/// One Physics section holding questions numbered 1..=count, ids `Q{n}`.
pub fn physics_snapshot(count: u32) -> StatusSnapshot {
    StatusSnapshot {
        sections: vec![SectionSnapshot {
            name: "Physics".into(),
            count: Some(count),
            questions: (1..=count)
                .map(|number| QuestionSnapshot {
                    id: qid(&format!("Q{number}")),
                    number,
                    status: QuestionStatus::Unanswered,
                    is_current: false,
                })
                .collect(),
        }],
    }
}

pub async fn session(api: Arc<ScriptedApi>, repo: &InMemoryRepository) -> ExamSession {
    let config = ExamConfig::new("C1", BASE, "/exam/C1/start/").unwrap();
    ExamSession::new(config, api, Arc::new(repo.clone())).await
}
