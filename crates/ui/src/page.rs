use dioxus::document::eval;
use dioxus::prelude::*;
use exam_core::model::{QuestionId, TileBoard};
use services::ExamPage;
use url::Url;

use crate::views::scripts::{assign_location_script, replace_history_script, submit_form_script};

/// `ExamPage` backed by the exam view's signals. History, full navigations
/// and the final form post go to the webview through `eval`.
#[derive(Clone, Copy)]
pub struct DesktopPage {
    pub board: SyncSignal<TileBoard>,
    pub busy: SyncSignal<bool>,
    pub current: SyncSignal<Option<QuestionId>>,
    pub content: SyncSignal<Option<String>>,
    pub location: SyncSignal<Option<Url>>,
    pub submit_enabled: SyncSignal<bool>,
}

/// Create the signals for one exam view.
pub fn use_desktop_page() -> DesktopPage {
    DesktopPage {
        board: use_signal_sync(TileBoard::default),
        busy: use_signal_sync(|| false),
        current: use_signal_sync(|| None),
        content: use_signal_sync(|| None),
        location: use_signal_sync(|| None),
        submit_enabled: use_signal_sync(|| true),
    }
}

impl ExamPage for DesktopPage {
    fn set_board_busy(&self, busy: bool) {
        let mut signal = self.busy;
        signal.set(busy);
    }

    fn show_board(&self, board: &TileBoard) {
        let mut signal = self.board;
        signal.set(board.clone());
    }

    fn set_current_marker(&self, current: Option<&QuestionId>) {
        let mut signal = self.current;
        signal.set(current.cloned());
    }

    fn replace_content(&self, region_html: &str) {
        let mut signal = self.content;
        signal.set(Some(region_html.to_string()));
    }

    fn replace_history(&self, url: &Url) {
        let mut signal = self.location;
        signal.set(Some(url.clone()));
        let _ = eval(&replace_history_script(url));
    }

    fn assign_location(&self, url: &Url) {
        tracing::info!(target: "exam.navigation", url = %url, "full navigation");
        let _ = eval(&assign_location_script(url));
    }

    fn set_submit_enabled(&self, enabled: bool) {
        let mut signal = self.submit_enabled;
        signal.set(enabled);
    }

    fn submit_form(&self, action: &Url, hidden_fields: &[(String, String)]) {
        let _ = eval(&submit_form_script(action, hidden_fields));
    }
}
