use std::sync::Arc;

use services::ExamSession;

pub trait UiApp: Send + Sync {
    fn exam_session(&self) -> ExamSession;
}

#[derive(Clone)]
pub struct AppContext {
    session: ExamSession,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.exam_session(),
        }
    }

    #[must_use]
    pub fn session(&self) -> ExamSession {
        self.session.clone()
    }
}

// Provided by the composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
