use std::sync::Arc;

use exam_core::model::{CourseId, NavigationIntent, QuestionId, TileBoard};
use storage::KeyValueRepository;

use crate::api::ExamApi;
use crate::attempt::AttemptTracker;
use crate::config::ExamConfig;
use crate::navigation::{NavigationController, NavigationOutcome, NavigationPhase};
use crate::page::ExamPage;
use crate::persistence::AnswerPersistence;
use crate::sidebar::TileRenderer;
use crate::status_store::StatusStore;
use crate::submission::{ConfirmDialog, SubmissionController};
use crate::suppression::ViolationGuard;

/// Handle for one exam attempt. Owns the status maps and wires every
/// controller to them.
#[derive(Clone)]
pub struct ExamSession {
    config: ExamConfig,
    store: StatusStore,
    renderer: TileRenderer,
    tracker: AttemptTracker,
    guard: ViolationGuard,
    navigation: NavigationController,
    submission: SubmissionController,
}

impl ExamSession {
    /// Hydrate the status store for the configured course and assemble the
    /// controllers.
    pub async fn new(
        config: ExamConfig,
        api: Arc<dyn ExamApi>,
        repo: Arc<dyn KeyValueRepository>,
    ) -> Self {
        let course = config.course_id().clone();
        let endpoints = config.endpoints().clone();
        let timings = config.timings();

        let store = StatusStore::load(&course, Arc::clone(&repo)).await;
        let guard = ViolationGuard::new(&course, repo);
        let renderer = TileRenderer::new(Arc::clone(&api), endpoints.clone(), store.clone());
        let tracker = AttemptTracker::new(store.clone(), renderer.clone());
        let persistence = AnswerPersistence::new(
            Arc::clone(&api),
            endpoints.save_answer().clone(),
            timings.save_settle,
        );
        let navigation = NavigationController::new(
            config.start_url().clone(),
            timings,
            api,
            store.clone(),
            renderer.clone(),
            persistence.clone(),
            tracker.clone(),
            guard.clone(),
        );
        let submission = SubmissionController::new(
            endpoints.grading().clone(),
            endpoints.results().clone(),
            store.clone(),
            persistence,
            tracker.clone(),
            guard.clone(),
        );

        tracing::info!(target: "exam.navigation", course = %course, start = %config.start_url(), "exam session ready");
        Self {
            config,
            store,
            renderer,
            tracker,
            guard,
            navigation,
            submission,
        }
    }

    /// Load the first question into the page.
    pub async fn open(&self, page: &dyn ExamPage) -> NavigationOutcome {
        self.navigation.bootstrap(page).await
    }

    pub async fn navigate(
        &self,
        page: &dyn ExamPage,
        intent: &NavigationIntent,
    ) -> NavigationOutcome {
        self.navigation.navigate(page, intent).await
    }

    /// Forward an answer change from the mounted form.
    pub async fn select_option(&self, page: &dyn ExamPage, value: &str) -> bool {
        self.tracker.on_selection_change(page, value).await
    }

    #[must_use]
    pub fn request_submit(&self) -> ConfirmDialog {
        self.submission.request_submit()
    }

    #[must_use]
    pub fn config(&self) -> &ExamConfig {
        &self.config
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        self.config.course_id()
    }

    #[must_use]
    pub fn store(&self) -> &StatusStore {
        &self.store
    }

    #[must_use]
    pub fn guard(&self) -> &ViolationGuard {
        &self.guard
    }

    #[must_use]
    pub fn board(&self) -> TileBoard {
        self.renderer.board()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<QuestionId> {
        self.renderer.current()
    }

    #[must_use]
    pub fn navigation_phase(&self) -> NavigationPhase {
        self.navigation.phase()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submission.is_submitting()
    }
}
