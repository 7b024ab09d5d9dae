#![forbid(unsafe_code)]

pub mod api;
pub mod attempt;
pub mod config;
pub mod error;
pub mod exam_session;
pub mod fragment;
pub mod navigation;
pub mod page;
pub mod persistence;
pub mod sidebar;
pub mod status_store;
pub mod submission;
pub mod suppression;

pub use api::{ExamApi, HttpExamApi};
pub use attempt::AttemptTracker;
pub use config::{ConfigOverrides, DEFAULT_BASE_URL, Endpoints, ExamConfig, Timings};
pub use error::{ConfigError, ExamApiError, FragmentError, StatusStoreError};
pub use exam_session::ExamSession;
pub use fragment::{CONTENT_REGION_ID, QuestionFragment, parse_fragment};
pub use navigation::{FallbackReason, NavigationController, NavigationOutcome, NavigationPhase};
pub use page::{ExamPage, PageEvent, RecordingPage};
pub use persistence::AnswerPersistence;
pub use sidebar::TileRenderer;
pub use status_store::StatusStore;
pub use submission::{ConfirmDialog, SubmissionController, SubmissionOutcome};
pub use suppression::{IgnoreViolations, ViolationGuard};
