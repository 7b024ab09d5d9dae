//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::ParseIdError;
use storage::repository::StorageError;

/// Errors emitted by `ExamApi` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamApiError {
    #[error("exam server responded with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("could not decode status payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors emitted by `StatusStore` when a mutation cannot be persisted.
///
/// The in-memory flag is still set when this is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatusStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while reading a fetched question fragment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FragmentError {
    #[error("fragment has no #{0} content region")]
    MissingContentRegion(&'static str),
    #[error("invalid selector {0}")]
    Selector(&'static str),
}

/// Errors emitted while building an `ExamConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("a course id is required (--course or EXAM_COURSE_ID)")]
    MissingCourse,
    #[error(transparent)]
    CourseId(#[from] ParseIdError),
    #[error("{raw} cannot be used as a base url")]
    CannotBeABase { raw: String },
    #[error("invalid url {raw}: {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
}
