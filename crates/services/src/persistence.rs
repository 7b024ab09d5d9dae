use std::sync::Arc;
use std::time::Duration;

use exam_core::model::AnswerForm;
use url::Url;

use crate::api::ExamApi;

/// Best-effort save of the live answer before the page moves on.
#[derive(Clone)]
pub struct AnswerPersistence {
    api: Arc<dyn ExamApi>,
    save_url: Url,
    settle: Duration,
}

impl AnswerPersistence {
    #[must_use]
    pub fn new(api: Arc<dyn ExamApi>, save_url: Url, settle: Duration) -> Self {
        Self {
            api,
            save_url,
            settle,
        }
    }

    /// Post the form's answer fields to the save endpoint.
    ///
    /// Always returns: after the settle delay when the save succeeds,
    /// immediately when it fails or there is no form.
    pub async fn persist_current(&self, form: Option<&AnswerForm>) {
        let Some(form) = form else {
            tracing::debug!(target: "exam.navigation", "no live form, nothing to save");
            return;
        };
        let fields = form.save_fields();
        match self.api.save_answer(&self.save_url, &fields).await {
            Ok(()) => tokio::time::sleep(self.settle).await,
            Err(err) => {
                tracing::warn!(
                    target: "exam.navigation",
                    question = ?form.question_id,
                    error = %err,
                    "answer save failed, continuing without it"
                );
            }
        }
    }
}
