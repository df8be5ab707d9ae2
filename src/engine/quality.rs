//! Low-effort submission heuristics. Advisory only: a suspect result is
//! still fully scored.

use super::resolve::resolve;
use crate::response::ResponseSet;
use crate::schema::ScoringSchema;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityReport {
    /// Scored items that resolved to a scale point.
    pub answered: usize,
    /// Scored items in the schema.
    pub total: usize,
    pub answered_fraction: f64,
    pub too_fast: bool,
    pub suspect: bool,
}

impl QualityReport {
    pub fn assess(
        responses: &ResponseSet,
        completion_seconds: Option<f64>,
        schema: &ScoringSchema,
    ) -> Self {
        let rules = &schema.thresholds.quality;

        let total = schema.items.len();
        let answered = schema
            .items
            .iter()
            .filter(|item| resolve(&item.field, responses, schema).is_some())
            .count();
        let answered_fraction = if total == 0 {
            1.0
        } else {
            answered as f64 / total as f64
        };

        // A zero time means the form did not record one.
        let too_fast =
            completion_seconds.is_some_and(|t| t != 0.0 && t < rules.min_completion_seconds);
        let suspect = too_fast || answered_fraction < rules.min_answered_fraction;

        Self {
            answered,
            total,
            answered_fraction,
            too_fast,
            suspect,
        }
    }
}

pub fn is_suspect(
    responses: &ResponseSet,
    completion_seconds: Option<f64>,
    schema: &ScoringSchema,
) -> bool {
    QualityReport::assess(responses, completion_seconds, schema).suspect
}
