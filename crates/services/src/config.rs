use std::env;
use std::time::Duration;

use exam_core::model::{CourseId, QuestionId};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Fixed delays used by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Pause after a successful answer save before continuing.
    pub save_settle: Duration,
    /// How long the violation-suppression flag stays set after a navigation.
    pub suppression_hold: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            save_settle: Duration::from_millis(30),
            suppression_hold: Duration::from_millis(1500),
        }
    }
}

/// Server addresses for one course, resolved against the base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    statuses: Url,
    save_answer: Url,
    grading: Url,
    results: Url,
}

impl Endpoints {
    fn resolve(base: &Url, course: &CourseId) -> Result<Self, ConfigError> {
        let course = course.as_str();
        Ok(Self {
            statuses: endpoint(base, &["exam", course, "statuses", ""])?,
            save_answer: endpoint(base, &["exam", "save-answer", ""])?,
            grading: endpoint(base, &["student", "calculate-marks"])?,
            results: endpoint(base, &["student", "check-marks", course])?,
        })
    }

    /// Status snapshot address, with the current question as a hint when known.
    #[must_use]
    pub fn statuses(&self, current: Option<&QuestionId>) -> Url {
        let mut url = self.statuses.clone();
        if let Some(current) = current {
            url.query_pairs_mut()
                .append_pair("current_qid", current.as_str());
        }
        url
    }

    #[must_use]
    pub fn save_answer(&self) -> &Url {
        &self.save_answer
    }

    #[must_use]
    pub fn grading(&self) -> &Url {
        &self.grading
    }

    #[must_use]
    pub fn results(&self) -> &Url {
        &self.results
    }
}

/// Explicit values that take precedence over the `EXAM_*` environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub course_id: Option<String>,
    pub base_url: Option<String>,
    pub start_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ExamConfig {
    course_id: CourseId,
    start_url: Url,
    endpoints: Endpoints,
    timings: Timings,
}

impl ExamConfig {
    /// Build a config from a course id, a base URL and a start address
    /// (absolute, or a path relative to the base).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the course id is blank or a URL does not parse.
    pub fn new(course_id: &str, base_url: &str, start_url: &str) -> Result<Self, ConfigError> {
        Self::build(course_id, base_url, Some(start_url))
    }

    /// Read `EXAM_COURSE_ID`, `EXAM_BASE_URL` and `EXAM_START_URL`, with
    /// `overrides` winning over each variable.
    ///
    /// The base URL defaults to [`DEFAULT_BASE_URL`] and the start address to
    /// `/exam/{course}/start/`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCourse` when no course id is set anywhere,
    /// or the errors of [`ExamConfig::new`].
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let course_id = overrides
            .course_id
            .or_else(|| env::var("EXAM_COURSE_ID").ok())
            .filter(|course| !course.trim().is_empty())
            .ok_or(ConfigError::MissingCourse)?;
        let base_url = overrides
            .base_url
            .or_else(|| env::var("EXAM_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let start_url = overrides
            .start_url
            .or_else(|| env::var("EXAM_START_URL").ok());
        Self::build(course_id.trim(), &base_url, start_url.as_deref())
    }

    fn build(course_id: &str, base_url: &str, start_url: Option<&str>) -> Result<Self, ConfigError> {
        let course_id = CourseId::new(course_id)?;
        let base = Url::parse(base_url).map_err(|source| ConfigError::InvalidUrl {
            raw: base_url.to_string(),
            source,
        })?;
        let start_url = match start_url {
            Some(start) => base.join(start).map_err(|source| ConfigError::InvalidUrl {
                raw: start.to_string(),
                source,
            })?,
            None => endpoint(&base, &["exam", course_id.as_str(), "start", ""])?,
        };
        let endpoints = Endpoints::resolve(&base, &course_id)?;
        Ok(Self {
            course_id,
            start_url,
            endpoints,
            timings: Timings::default(),
        })
    }

    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    #[must_use]
    pub fn timings(&self) -> Timings {
        self.timings
    }
}

/// `base` with its path replaced by `segments`, each percent-encoded.
/// A trailing `""` segment keeps the trailing slash.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ConfigError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| ConfigError::CannotBeABase {
            raw: base.to_string(),
        })?
        .clear()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_resolve_against_base() {
        let config = ExamConfig::new("C1", "http://exam.local", "/exam/C1/start/").unwrap();
        let endpoints = config.endpoints();
        assert_eq!(
            endpoints.statuses(None).as_str(),
            "http://exam.local/exam/C1/statuses/"
        );
        assert_eq!(
            endpoints
                .statuses(Some(&QuestionId::new("Q3").unwrap()))
                .as_str(),
            "http://exam.local/exam/C1/statuses/?current_qid=Q3"
        );
        assert_eq!(
            endpoints.save_answer().as_str(),
            "http://exam.local/exam/save-answer/"
        );
        assert_eq!(
            endpoints.grading().as_str(),
            "http://exam.local/student/calculate-marks"
        );
        assert_eq!(
            endpoints.results().as_str(),
            "http://exam.local/student/check-marks/C1"
        );
        assert_eq!(
            config.start_url().as_str(),
            "http://exam.local/exam/C1/start/"
        );
    }

    #[test]
    fn absolute_start_url_is_kept() {
        let config =
            ExamConfig::new("C1", "http://exam.local", "https://other.local/start").unwrap();
        assert_eq!(config.start_url().as_str(), "https://other.local/start");
    }

    #[test]
    fn rejects_blank_course_and_bad_base() {
        assert!(matches!(
            ExamConfig::new(" ", "http://exam.local", "/"),
            Err(ConfigError::CourseId(_))
        ));
        assert!(matches!(
            ExamConfig::new("C1", "not a url", "/"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn course_id_is_a_single_path_segment() {
        let config = ExamConfig::new("10?x#y", "http://exam.local", "/").unwrap();
        let endpoints = config.endpoints();
        assert_eq!(
            endpoints.statuses(None).as_str(),
            "http://exam.local/exam/10%3Fx%23y/statuses/"
        );
        assert_eq!(endpoints.statuses(None).query(), None);
        assert_eq!(
            endpoints.results().as_str(),
            "http://exam.local/student/check-marks/10%3Fx%23y"
        );
    }

    #[test]
    fn overrides_fill_the_config_and_default_the_start_page() {
        let config = ExamConfig::from_env(ConfigOverrides {
            course_id: Some(" C9 ".into()),
            base_url: Some("http://exam.local/portal/?lang=en".into()),
            start_url: None,
        })
        .unwrap();
        assert_eq!(config.course_id().as_str(), "C9");
        assert_eq!(
            config.start_url().as_str(),
            "http://exam.local/exam/C9/start/"
        );
        assert_eq!(
            config.endpoints().grading().as_str(),
            "http://exam.local/student/calculate-marks"
        );
    }

    #[test]
    fn rejects_a_base_that_cannot_hold_paths() {
        assert!(matches!(
            ExamConfig::new("C1", "mailto:exam@local", "/"),
            Err(ConfigError::CannotBeABase { .. } | ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn default_timings_match_the_exam_page() {
        let timings = Timings::default();
        assert_eq!(timings.save_settle, Duration::from_millis(30));
        assert_eq!(timings.suppression_hold, Duration::from_millis(1500));
    }
}
