use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use exam_core::model::{NavigationIntent, QuestionId};
use url::Url;

use crate::api::ExamApi;
use crate::attempt::AttemptTracker;
use crate::config::Timings;
use crate::fragment::{QuestionFragment, parse_fragment};
use crate::page::ExamPage;
use crate::persistence::AnswerPersistence;
use crate::sidebar::TileRenderer;
use crate::status_store::StatusStore;
use crate::suppression::ViolationGuard;

/// Where the most recent navigation attempt currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationPhase {
    #[default]
    Idle,
    Persisting,
    Fetching,
    Swapping,
}

/// Why a navigation gave up on the in-place swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    FetchFailed,
    MissingContentRegion,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailed => f.write_str("fetch failed"),
            Self::MissingContentRegion => f.write_str("missing content region"),
        }
    }
}

/// Terminal state of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Content was swapped in place.
    Swapped {
        question_id: Option<QuestionId>,
        url: Url,
    },
    /// The page was sent to `url` with a full navigation.
    FallbackRedirect { url: Url, reason: FallbackReason },
}

/// Runs "go to question N" without a full page reload.
///
/// Concurrent attempts are not cancelled; the last swap to land wins.
#[derive(Clone)]
pub struct NavigationController {
    start_url: Url,
    timings: Timings,
    api: Arc<dyn ExamApi>,
    store: StatusStore,
    renderer: TileRenderer,
    persistence: AnswerPersistence,
    tracker: AttemptTracker,
    guard: ViolationGuard,
    sequence: Arc<AtomicU64>,
    phase: Arc<Mutex<NavigationPhase>>,
}

impl NavigationController {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        start_url: Url,
        timings: Timings,
        api: Arc<dyn ExamApi>,
        store: StatusStore,
        renderer: TileRenderer,
        persistence: AnswerPersistence,
        tracker: AttemptTracker,
        guard: ViolationGuard,
    ) -> Self {
        Self {
            start_url,
            timings,
            api,
            store,
            renderer,
            persistence,
            tracker,
            guard,
            sequence: Arc::new(AtomicU64::new(0)),
            phase: Arc::new(Mutex::new(NavigationPhase::Idle)),
        }
    }

    #[must_use]
    pub fn phase(&self) -> NavigationPhase {
        self.phase.lock().map(|phase| *phase).unwrap_or_default()
    }

    /// Navigate to the question described by `intent`.
    ///
    /// The suppression flag is set first and its release is scheduled on
    /// every terminal state.
    pub async fn navigate(
        &self,
        page: &dyn ExamPage,
        intent: &NavigationIntent,
    ) -> NavigationOutcome {
        let attempt = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let url = intent.target_url(&self.start_url);
        tracing::debug!(
            target: "exam.navigation",
            attempt,
            section = intent.section(),
            number = intent.question_number(),
            "navigation started"
        );

        self.set_phase(NavigationPhase::Persisting);
        self.guard.suppress().await;
        let live = self.tracker.current_form();
        self.persistence.persist_current(live.as_ref()).await;

        let outcome = self.load(page, url, attempt).await;
        // The hold runs from the swap, not from the status refresh.
        drop(self.guard.release_after(self.timings.suppression_hold));
        self.refresh_after(page, &outcome).await;
        self.set_phase(NavigationPhase::Idle);
        outcome
    }

    /// Fetch the start page and splice it in like a navigation would.
    pub async fn bootstrap(&self, page: &dyn ExamPage) -> NavigationOutcome {
        let attempt = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let outcome = self.load(page, self.start_url.clone(), attempt).await;
        self.refresh_after(page, &outcome).await;
        self.set_phase(NavigationPhase::Idle);
        outcome
    }

    async fn refresh_after(&self, page: &dyn ExamPage, outcome: &NavigationOutcome) {
        if matches!(outcome, NavigationOutcome::Swapped { .. }) {
            self.renderer.fetch_and_render(page).await;
        }
    }

    async fn load(&self, page: &dyn ExamPage, url: Url, attempt: u64) -> NavigationOutcome {
        self.set_phase(NavigationPhase::Fetching);
        let html = match self.api.fetch_page(&url).await {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(target: "exam.navigation", attempt, url = %url, error = %err, "question fetch failed");
                return fallback(page, url, FallbackReason::FetchFailed);
            }
        };
        let fragment = match parse_fragment(&html) {
            Ok(fragment) => fragment,
            Err(err) => {
                tracing::warn!(target: "exam.navigation", attempt, url = %url, error = %err, "unusable question page");
                return fallback(page, url, FallbackReason::MissingContentRegion);
            }
        };

        self.set_phase(NavigationPhase::Swapping);
        let question_id = self.apply(page, fragment).await;
        page.replace_history(&url);
        tracing::debug!(target: "exam.navigation", attempt, question = ?question_id, "content swapped");
        NavigationOutcome::Swapped { question_id, url }
    }

    async fn apply(&self, page: &dyn ExamPage, fragment: QuestionFragment) -> Option<QuestionId> {
        page.replace_content(&fragment.region_html);
        let question_id = self.tracker.mount(fragment.form);
        if let Some(question_id) = &question_id {
            if let Err(err) = self.store.mark_visited(question_id).await {
                tracing::warn!(target: "exam.store", question = %question_id, error = %err, "visited flag not persisted");
            }
        }
        self.renderer.set_current(page, question_id.clone());
        question_id
    }

    fn set_phase(&self, next: NavigationPhase) {
        if let Ok(mut phase) = self.phase.lock() {
            *phase = next;
        }
    }
}

fn fallback(page: &dyn ExamPage, url: Url, reason: FallbackReason) -> NavigationOutcome {
    page.assign_location(&url);
    NavigationOutcome::FallbackRedirect { url, reason }
}
