//! Value resolution: one raw answer → a 1–5 scale point, or nothing.

use crate::response::{AnswerValue, ResponseSet};
use crate::schema::ScoringSchema;
use regex::Regex;
use std::sync::LazyLock;

/// Leading integer of a free-form answer such as `"4"`, `" 2 "` or `"5 - Always"`.
static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("static pattern compiles"));

const SCALE: std::ops::RangeInclusive<i64> = 1..=5;

/// Resolve `field` to a scale point.
///
/// Fields with an ordinal map only accept one of the map's labels. Every
/// other field takes an integer-like answer inside 1–5. Anything else,
/// including booleans and garbage text, is `None` and must be treated as
/// unanswered rather than as a neutral 3.
pub fn resolve(field: &str, responses: &ResponseSet, schema: &ScoringSchema) -> Option<u8> {
    let answer = responses.get(field);

    if let Some(map) = schema.ordinal_map(field) {
        return answer
            .as_text()
            .and_then(|label| map.get(label))
            .copied()
            .filter(|v| SCALE.contains(&i64::from(*v)));
    }

    let value = match answer {
        AnswerValue::Integer(v) => Some(*v),
        AnswerValue::Number(v) if v.is_finite() => Some(v.trunc() as i64),
        AnswerValue::Text(s) => leading_integer(s),
        AnswerValue::Number(_) | AnswerValue::Bool(_) | AnswerValue::Missing => None,
    }?;

    SCALE.contains(&value).then(|| value as u8)
}

fn leading_integer(text: &str) -> Option<i64> {
    LEADING_INT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
