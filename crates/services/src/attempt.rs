use std::sync::{Arc, Mutex};

use exam_core::model::{AnswerForm, QuestionId};

use crate::page::ExamPage;
use crate::sidebar::TileRenderer;
use crate::status_store::StatusStore;

/// Tracks answer selections on the mounted form and flags the question as
/// attempted.
///
/// The form must be mounted again after every content swap; selections are
/// only applied to the form mounted most recently.
#[derive(Clone)]
pub struct AttemptTracker {
    store: StatusStore,
    renderer: TileRenderer,
    live: Arc<Mutex<Option<AnswerForm>>>,
}

impl AttemptTracker {
    #[must_use]
    pub fn new(store: StatusStore, renderer: TileRenderer) -> Self {
        Self {
            store,
            renderer,
            live: Arc::new(Mutex::new(None)),
        }
    }

    /// Bind to `form`, replacing whatever was mounted before. Returns the
    /// mounted question's id.
    pub fn mount(&self, form: Option<AnswerForm>) -> Option<QuestionId> {
        let question_id = form.as_ref().and_then(|form| form.question_id.clone());
        if let Ok(mut live) = self.live.lock() {
            *live = form;
        }
        question_id
    }

    /// Copy of the mounted form, if any.
    #[must_use]
    pub fn current_form(&self) -> Option<AnswerForm> {
        self.live.lock().ok().and_then(|live| live.clone())
    }

    /// Handle a change on an answer control of the mounted form.
    ///
    /// Returns `true` when the question was flagged attempted.
    pub async fn on_selection_change(&self, page: &dyn ExamPage, value: &str) -> bool {
        let question_id = {
            let Ok(mut live) = self.live.lock() else {
                return false;
            };
            let Some(form) = live.as_mut() else {
                return false;
            };
            if !form.select(value) {
                return false;
            }
            form.question_id.clone()
        };

        let Some(question_id) = question_id else {
            return false;
        };
        if let Err(err) = self.store.mark_attempted(&question_id).await {
            tracing::warn!(target: "exam.store", question = %question_id, error = %err, "attempted flag not persisted");
        }
        self.renderer.fast_refresh(page).await;
        true
    }
}
