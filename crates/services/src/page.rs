use std::sync::{Arc, Mutex};

use exam_core::model::{QuestionId, TileBoard};
use url::Url;

/// The live exam page, as seen by the engine.
///
/// Implementations own the actual rendering (a webview, a component tree, a
/// headless recorder). Every method is a synchronous, infallible UI effect;
/// the engine decides ordering and fallbacks.
pub trait ExamPage: Send + Sync {
    /// Mark the tile grid busy while a render pass runs.
    fn set_board_busy(&self, busy: bool);

    /// Draw the whole tile grid.
    fn show_board(&self, board: &TileBoard);

    /// Update the sidebar's current-question marker.
    fn set_current_marker(&self, current: Option<&QuestionId>);

    /// Replace the contents of the answer-form region.
    fn replace_content(&self, region_html: &str);

    /// Replace the current history entry without adding a new one.
    fn replace_history(&self, url: &Url);

    /// Leave the page with a full navigation.
    fn assign_location(&self, url: &Url);

    /// Enable or disable the final-submit trigger.
    fn set_submit_enabled(&self, enabled: bool);

    /// Submit the live answer form to `action` as a standard form post,
    /// after attaching `hidden_fields`.
    fn submit_form(&self, action: &Url, hidden_fields: &[(String, String)]);
}

/// Effect recorded by `RecordingPage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    BoardBusy(bool),
    BoardShown(TileBoard),
    CurrentMarker(Option<QuestionId>),
    ContentReplaced(String),
    HistoryReplaced(Url),
    LocationAssigned(Url),
    SubmitEnabled(bool),
    FormSubmitted {
        action: Url,
        hidden_fields: Vec<(String, String)>,
    },
}

/// Headless page that records every effect, for tests and prototyping.
#[derive(Clone, Default)]
pub struct RecordingPage {
    events: Arc<Mutex<Vec<PageEvent>>>,
}

impl RecordingPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<PageEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// The most recently shown board, if any.
    #[must_use]
    pub fn last_board(&self) -> Option<TileBoard> {
        self.events().into_iter().rev().find_map(|event| match event {
            PageEvent::BoardShown(board) => Some(board),
            _ => None,
        })
    }

    /// The most recent full navigation, if any.
    #[must_use]
    pub fn assigned_location(&self) -> Option<Url> {
        self.events().into_iter().rev().find_map(|event| match event {
            PageEvent::LocationAssigned(url) => Some(url),
            _ => None,
        })
    }

    fn push(&self, event: PageEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl ExamPage for RecordingPage {
    fn set_board_busy(&self, busy: bool) {
        self.push(PageEvent::BoardBusy(busy));
    }

    fn show_board(&self, board: &TileBoard) {
        self.push(PageEvent::BoardShown(board.clone()));
    }

    fn set_current_marker(&self, current: Option<&QuestionId>) {
        self.push(PageEvent::CurrentMarker(current.cloned()));
    }

    fn replace_content(&self, region_html: &str) {
        self.push(PageEvent::ContentReplaced(region_html.to_string()));
    }

    fn replace_history(&self, url: &Url) {
        self.push(PageEvent::HistoryReplaced(url.clone()));
    }

    fn assign_location(&self, url: &Url) {
        self.push(PageEvent::LocationAssigned(url.clone()));
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.push(PageEvent::SubmitEnabled(enabled));
    }

    fn submit_form(&self, action: &Url, hidden_fields: &[(String, String)]) {
        self.push(PageEvent::FormSubmitted {
            action: action.clone(),
            hidden_fields: hidden_fields.to_vec(),
        });
    }
}
