use std::sync::{Arc, Mutex};

use exam_core::model::{QuestionId, StatusSnapshot, TileBoard};

use crate::api::ExamApi;
use crate::config::Endpoints;
use crate::page::ExamPage;
use crate::status_store::StatusStore;

#[derive(Debug, Default)]
struct SidebarState {
    board: TileBoard,
    current: Option<QuestionId>,
}

/// Builds and refreshes the question-tile grid.
#[derive(Clone)]
pub struct TileRenderer {
    api: Arc<dyn ExamApi>,
    endpoints: Endpoints,
    store: StatusStore,
    state: Arc<Mutex<SidebarState>>,
}

impl TileRenderer {
    #[must_use]
    pub fn new(api: Arc<dyn ExamApi>, endpoints: Endpoints, store: StatusStore) -> Self {
        Self {
            api,
            endpoints,
            store,
            state: Arc::new(Mutex::new(SidebarState::default())),
        }
    }

    /// Rebuild the grid from `snapshot` merged with the local flags.
    pub async fn render(&self, page: &dyn ExamPage, snapshot: &StatusSnapshot) {
        page.set_board_busy(true);
        let (visited, attempted) = self.store.maps().await;
        let board = {
            let Ok(mut state) = self.state.lock() else {
                page.set_board_busy(false);
                return;
            };
            let board = TileBoard::build(snapshot, &visited, &attempted, state.current.as_ref());
            state.board = board.clone();
            board
        };
        page.show_board(&board);
        page.set_board_busy(false);
        tracing::trace!(target: "exam.sidebar", sections = board.sections.len(), "tiles rendered");
    }

    /// Recompute tile states from the local flags without a network round trip.
    pub async fn fast_refresh(&self, page: &dyn ExamPage) {
        let (visited, attempted) = self.store.maps().await;
        let board = {
            let Ok(mut state) = self.state.lock() else {
                return;
            };
            state.board.refresh_states(&visited, &attempted);
            state.board.clone()
        };
        page.show_board(&board);
    }

    /// Fetch the authoritative snapshot and render it.
    ///
    /// Failures keep the last rendered grid.
    pub async fn fetch_and_render(&self, page: &dyn ExamPage) {
        let url = self.endpoints.statuses(self.current().as_ref());
        match self.api.fetch_statuses(&url).await {
            Ok(snapshot) => self.render(page, &snapshot).await,
            Err(err) => {
                tracing::debug!(target: "exam.sidebar", url = %url, error = %err, "status fetch failed, keeping last grid");
            }
        }
    }

    /// Move the current-question marker.
    pub fn set_current(&self, page: &dyn ExamPage, current: Option<QuestionId>) {
        if let Ok(mut state) = self.state.lock() {
            state.current.clone_from(&current);
        }
        page.set_current_marker(current.as_ref());
    }

    #[must_use]
    pub fn current(&self) -> Option<QuestionId> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.current.clone())
    }

    #[must_use]
    pub fn board(&self) -> TileBoard {
        self.state
            .lock()
            .map(|state| state.board.clone())
            .unwrap_or_default()
    }
}
