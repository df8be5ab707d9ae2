//! Survey responses as received from the form collaborator.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One raw answer. Deserializes from any JSON scalar; `null` is `Missing`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    #[default]
    Missing,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl AnswerValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, AnswerValue::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for AnswerValue {
    fn from(v: i64) -> Self {
        AnswerValue::Integer(v)
    }
}

impl From<i32> for AnswerValue {
    fn from(v: i32) -> Self {
        AnswerValue::Integer(v.into())
    }
}

impl From<bool> for AnswerValue {
    fn from(v: bool) -> Self {
        AnswerValue::Bool(v)
    }
}

impl From<&str> for AnswerValue {
    fn from(v: &str) -> Self {
        AnswerValue::Text(v.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(v: String) -> Self {
        AnswerValue::Text(v)
    }
}

/// Field id → answer for one survey attempt. Absent fields are missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet(HashMap<String, AnswerValue>);

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Answer for `field`; `Missing` when the field is absent.
    pub fn get(&self, field: &str) -> &AnswerValue {
        static MISSING: AnswerValue = AnswerValue::Missing;
        self.0.get(field).unwrap_or(&MISSING)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A submitted record: the answers plus how long the respondent took.
///
/// On the wire the answers sit at the top level next to
/// `completion_time_seconds`, the way the form posts them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time_seconds: Option<f64>,
    #[serde(flatten)]
    pub responses: ResponseSet,
}

impl Submission {
    pub fn new(responses: ResponseSet, completion_time_seconds: Option<f64>) -> Self {
        Self {
            completion_time_seconds,
            responses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_value_variants_from_json() {
        let set: ResponseSet = serde_json::from_str(
            r#"{"a": null, "b": true, "c": 4, "d": 3.5, "e": "Often"}"#,
        )
        .unwrap();
        assert_eq!(set.get("a"), &AnswerValue::Missing);
        assert_eq!(set.get("b"), &AnswerValue::Bool(true));
        assert_eq!(set.get("c"), &AnswerValue::Integer(4));
        assert_eq!(set.get("d"), &AnswerValue::Number(3.5));
        assert_eq!(set.get("e"), &AnswerValue::Text("Often".to_string()));
        assert!(set.get("absent").is_missing());
    }

    #[test]
    fn test_submission_flattens_answers() {
        let sub: Submission = serde_json::from_str(
            r#"{"completion_time_seconds": 412, "belonging": 4, "friendship_ease": "Easy"}"#,
        )
        .unwrap();
        assert_eq!(sub.completion_time_seconds, Some(412.0));
        assert_eq!(sub.responses.get("belonging"), &AnswerValue::Integer(4));
        assert_eq!(sub.responses.get("friendship_ease").as_text(), Some("Easy"));
        assert!(sub.responses.get("completion_time_seconds").is_missing());
    }

    #[test]
    fn test_submission_without_time() {
        let sub: Submission = serde_json::from_str(r#"{"belonging": "4"}"#).unwrap();
        assert_eq!(sub.completion_time_seconds, None);
        assert_eq!(sub.responses.len(), 1);
    }

    #[test]
    fn test_collect_response_set() {
        let set: ResponseSet = [("panas_1", 3), ("panas_2", 5)].into_iter().collect();
        assert_eq!(set.get("panas_2"), &AnswerValue::Integer(5));
    }
}
