use exam_core::model::CourseId;

/// Client-local storage keys for one course.
///
/// Keys are namespaced by course id so concurrent exams sharing one store
/// never collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    visited: String,
    attempted: String,
    suppress_violation: String,
}

impl StorageKeys {
    #[must_use]
    pub fn for_course(course: &CourseId) -> Self {
        Self {
            visited: format!("exam_visited_{course}"),
            attempted: format!("exam_attempted_{course}"),
            suppress_violation: format!("suppress_violation_{course}"),
        }
    }

    #[must_use]
    pub fn visited(&self) -> &str {
        &self.visited
    }

    #[must_use]
    pub fn attempted(&self) -> &str {
        &self.attempted
    }

    #[must_use]
    pub fn suppress_violation(&self) -> &str {
        &self.suppress_violation
    }
}
