use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::ids::QuestionId;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatusDecodeError {
    #[error("status map is not a JSON object: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Per-question boolean flags for one exam attempt.
///
/// Stored as a JSON object (`{"Q7": true}`). A key mapped to `false` is
/// equivalent to an absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionStatusMap(BTreeMap<QuestionId, bool>);

impl QuestionStatusMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a stored map. Blank input decodes to an empty map.
    ///
    /// Entries are read one by one: a non-boolean value counts by its
    /// truthiness (`1` and `"yes"` set the flag, `0`, `""` and `null` do not)
    /// and a blank key is skipped.
    ///
    /// # Errors
    ///
    /// Returns `StatusDecodeError::Malformed` if the text is not a JSON object.
    pub fn from_json(raw: &str) -> Result<Self, StatusDecodeError> {
        if raw.trim().is_empty() {
            return Ok(Self::new());
        }
        let entries: BTreeMap<String, Value> = serde_json::from_str(raw)?;
        Ok(Self(
            entries
                .into_iter()
                .filter_map(|(key, value)| Some((QuestionId::new(key).ok()?, truthy(&value))))
                .collect(),
        ))
    }

    /// Encode the map for storage.
    #[must_use]
    pub fn to_json(&self) -> String {
        // A map of string keys to booleans always serializes.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    /// Set the flag for `id`. Returns `true` if it was not already set.
    pub fn mark(&mut self, id: QuestionId) -> bool {
        self.0.insert(id, true) != Some(true)
    }

    #[must_use]
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.values().filter(|flag| **flag).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionId> {
        self.0.iter().filter(|(_, flag)| **flag).map(|(id, _)| id)
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Local visited/attempted flags for a single question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFlags {
    pub visited: bool,
    pub attempted: bool,
}

impl StatusFlags {
    #[must_use]
    pub fn lookup(id: &QuestionId, visited: &QuestionStatusMap, attempted: &QuestionStatusMap) -> Self {
        Self {
            visited: visited.contains(id),
            attempted: attempted.contains(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(raw: &str) -> QuestionId {
        QuestionId::new(raw).unwrap()
    }

    #[test]
    fn decodes_stored_object() {
        let map = QuestionStatusMap::from_json(r#"{"Q1":true,"Q2":false}"#).unwrap();
        assert!(map.contains(&qid("Q1")));
        assert!(!map.contains(&qid("Q2")));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(QuestionStatusMap::from_json("").unwrap().is_empty());
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(QuestionStatusMap::from_json("{not json").is_err());
        assert!(QuestionStatusMap::from_json("[1,2]").is_err());
    }

    #[test]
    fn odd_entries_do_not_discard_the_map() {
        let map = QuestionStatusMap::from_json(
            r#"{"Q1":1,"Q2":0,"Q3":"yes","Q4":"","Q5":null,"  ":true,"Q6":true}"#,
        )
        .unwrap();
        assert!(map.contains(&qid("Q1")));
        assert!(!map.contains(&qid("Q2")));
        assert!(map.contains(&qid("Q3")));
        assert!(!map.contains(&qid("Q4")));
        assert!(!map.contains(&qid("Q5")));
        assert!(map.contains(&qid("Q6")));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn mark_reports_changes() {
        let mut map = QuestionStatusMap::new();
        assert!(map.mark(qid("Q7")));
        assert!(!map.mark(qid("Q7")));
        assert_eq!(map.to_json(), r#"{"Q7":true}"#);
    }
}
