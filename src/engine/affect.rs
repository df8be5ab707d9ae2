//! PANAS positive and negative affect sums.

use super::resolve::resolve;
use crate::response::ResponseSet;
use crate::schema::ScoringSchema;
use serde::Serialize;

/// Each sum is present only when every item of its list resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AffectScores {
    pub positive: Option<u32>,
    pub negative: Option<u32>,
}

fn sum_all(fields: &[String], responses: &ResponseSet, schema: &ScoringSchema) -> Option<u32> {
    if fields.is_empty() {
        return None;
    }
    fields
        .iter()
        .map(|field| resolve(field, responses, schema).map(u32::from))
        .sum()
}

pub fn affect(responses: &ResponseSet, schema: &ScoringSchema) -> AffectScores {
    match &schema.affect {
        Some(scale) => AffectScores {
            positive: sum_all(&scale.positive, responses, schema),
            negative: sum_all(&scale.negative, responses, schema),
        },
        None => AffectScores::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_lists_sum() {
        let schema = ScoringSchema::builtin();
        let responses: ResponseSet = (1..=20).map(|i| (format!("panas_{}", i), 4)).collect();
        let scores = affect(&responses, schema);
        assert_eq!(scores.positive, Some(40));
        assert_eq!(scores.negative, Some(40));
    }

    #[test]
    fn test_one_gap_drops_that_list_only() {
        let schema = ScoringSchema::builtin();
        let mut responses: ResponseSet = (1..=20).map(|i| (format!("panas_{}", i), 2)).collect();
        // panas_2 is on the negative list
        responses.insert("panas_2", "n/a");
        let scores = affect(&responses, schema);
        assert_eq!(scores.positive, Some(20));
        assert_eq!(scores.negative, None);
    }

    #[test]
    fn test_no_scale_declared() {
        let schema = crate::schema::fixtures::schema(vec![]);
        let responses = ResponseSet::new().with("panas_1", 5);
        assert_eq!(affect(&responses, &schema), AffectScores::default());
    }
}
