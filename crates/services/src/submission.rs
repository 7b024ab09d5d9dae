use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use exam_core::model::SELECTED_OPTION_FIELD;
use url::Url;

use crate::attempt::AttemptTracker;
use crate::page::ExamPage;
use crate::persistence::AnswerPersistence;
use crate::status_store::StatusStore;
use crate::suppression::{IgnoreViolations, ViolationGuard};

/// How a confirmed submission left the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The answer form was posted to the grading endpoint.
    Submitted { action: Url, selected: Option<String> },
    /// No form was mounted; the page went straight to the results address.
    Redirected { url: Url },
    /// A submission was already in flight.
    AlreadySubmitting,
}

/// Confirms and hands off the final submission.
#[derive(Clone)]
pub struct SubmissionController {
    grading_url: Url,
    results_url: Url,
    store: StatusStore,
    persistence: AnswerPersistence,
    tracker: AttemptTracker,
    guard: ViolationGuard,
    submitting: Arc<AtomicBool>,
}

impl SubmissionController {
    #[must_use]
    pub fn new(
        grading_url: Url,
        results_url: Url,
        store: StatusStore,
        persistence: AnswerPersistence,
        tracker: AttemptTracker,
        guard: ViolationGuard,
    ) -> Self {
        Self {
            grading_url,
            results_url,
            store,
            persistence,
            tracker,
            guard,
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Open the confirmation dialog. Violations are ignored while it is open.
    #[must_use]
    pub fn request_submit(&self) -> ConfirmDialog {
        ConfirmDialog {
            controller: self.clone(),
            ignore: self.guard.ignore_violations(),
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    async fn submit(&self, page: &dyn ExamPage) -> SubmissionOutcome {
        if self.submitting.swap(true, Ordering::AcqRel) {
            tracing::debug!(target: "exam.submission", "submit already in flight");
            return SubmissionOutcome::AlreadySubmitting;
        }
        page.set_submit_enabled(false);

        let form = self.tracker.current_form();
        self.persistence.persist_current(form.as_ref()).await;

        let Some(form) = form else {
            tracing::info!(target: "exam.submission", url = %self.results_url, "no answer form, redirecting to results");
            page.assign_location(&self.results_url);
            return SubmissionOutcome::Redirected {
                url: self.results_url.clone(),
            };
        };

        let mut hidden = Vec::new();
        if let Some(selected) = &form.selected_option {
            hidden.push((SELECTED_OPTION_FIELD.to_string(), selected.clone()));
            if let Some(question_id) = &form.question_id {
                if let Err(err) = self.store.mark_attempted(question_id).await {
                    tracing::warn!(target: "exam.store", question = %question_id, error = %err, "attempted flag not persisted");
                }
            }
        }

        tracing::info!(
            target: "exam.submission",
            action = %self.grading_url,
            question = ?form.question_id,
            answered = form.has_selection(),
            "submitting exam"
        );
        page.submit_form(&self.grading_url, &hidden);
        SubmissionOutcome::Submitted {
            action: self.grading_url.clone(),
            selected: form.selected_option,
        }
    }
}

/// An open submit-confirmation dialog.
///
/// Closing it either way clears the ignore-violations flag.
#[must_use = "dropping the dialog cancels the submission"]
pub struct ConfirmDialog {
    controller: SubmissionController,
    ignore: IgnoreViolations,
}

impl ConfirmDialog {
    /// Close the dialog without submitting.
    pub fn cancel(self) {
        tracing::debug!(target: "exam.submission", "submission cancelled");
    }

    /// Close the dialog and submit.
    pub async fn confirm(self, page: &dyn ExamPage) -> SubmissionOutcome {
        let Self { controller, ignore } = self;
        drop(ignore);
        controller.submit(page).await
    }
}
