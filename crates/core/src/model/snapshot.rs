use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// Authoritative status body returned by the statuses endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default)]
    pub sections: Vec<SectionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSnapshot {
    pub name: String,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub questions: Vec<QuestionSnapshot>,
}

impl SectionSnapshot {
    /// Count shown in the section header: the reported count when non-zero,
    /// otherwise the number of listed questions.
    #[must_use]
    pub fn display_count(&self) -> usize {
        match self.count {
            Some(count) if count > 0 => count as usize,
            _ => self.questions.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSnapshot {
    pub id: QuestionId,
    pub number: u32,
    #[serde(default)]
    pub status: QuestionStatus,
    #[serde(default)]
    pub is_current: bool,
}

/// Server-side answer status. Unknown values are read as unanswered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Attempted,
    #[default]
    #[serde(other)]
    Unanswered,
}
