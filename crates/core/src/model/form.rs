use crate::model::ids::QuestionId;

pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";
pub const CURRENT_INDEX_FIELD: &str = "current_q_index";
pub const SELECTED_OPTION_FIELD: &str = "selected_option";
pub const ACTIVE_SUBJECT_FIELD: &str = "active_subject";
pub const COURSE_ID_FIELD: &str = "course_id";

/// The answer form currently mounted in the content region.
///
/// Built from the `<form>` inside a fetched fragment; the selected option is
/// then tracked from change events rather than re-read from markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerForm {
    pub question_id: Option<QuestionId>,
    pub csrf_token: Option<String>,
    pub current_index: Option<String>,
    pub active_subject: Option<String>,
    pub course_id: Option<String>,
    pub options: Vec<String>,
    pub selected_option: Option<String>,
}

impl AnswerForm {
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.selected_option.is_some()
    }

    /// Record a selection. Values the form does not offer are ignored.
    ///
    /// Returns `true` if the selection was accepted.
    pub fn select(&mut self, value: &str) -> bool {
        if !self.options.is_empty() && !self.options.iter().any(|option| option == value) {
            return false;
        }
        self.selected_option = Some(value.to_string());
        true
    }

    /// Fields posted to the save-answer endpoint, in a stable order.
    /// Absent fields are omitted rather than sent empty.
    #[must_use]
    pub fn save_fields(&self) -> Vec<(&'static str, String)> {
        [
            (CSRF_FIELD, self.csrf_token.as_ref()),
            (CURRENT_INDEX_FIELD, self.current_index.as_ref()),
            (SELECTED_OPTION_FIELD, self.selected_option.as_ref()),
            (ACTIVE_SUBJECT_FIELD, self.active_subject.as_ref()),
            (COURSE_ID_FIELD, self.course_id.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value.clone())))
        .collect()
    }
}
