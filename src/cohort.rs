//! Aggregate view over a batch of scored submissions.

use crate::engine::ScoringResult;
use crate::schema::TraitMap;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortSummary {
    pub respondents: usize,
    pub suspect: usize,
    /// Archetype key → respondents assigned to it.
    pub archetypes: BTreeMap<String, usize>,
    /// Mean score per trait. `None` for an empty cohort.
    pub trait_means: Option<TraitMap<f64>>,
    /// Mean over respondents whose affect sum is present.
    pub positive_affect_mean: Option<f64>,
    pub negative_affect_mean: Option<f64>,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

impl CohortSummary {
    /// Summarise every result, suspect ones included.
    pub fn from_results(results: &[ScoringResult]) -> Self {
        Self::summarise(results.iter())
    }

    /// Summarise only results that passed the quality checks. `suspect`
    /// still reports how many were dropped.
    pub fn exclude_suspect(results: &[ScoringResult]) -> Self {
        let dropped = results.iter().filter(|r| r.suspect).count();
        let mut summary = Self::summarise(results.iter().filter(|r| !r.suspect));
        summary.suspect = dropped;
        summary
    }

    fn summarise<'a>(results: impl Iterator<Item = &'a ScoringResult> + Clone) -> Self {
        let respondents = results.clone().count();
        let suspect = results.clone().filter(|r| r.suspect).count();

        let mut archetypes = BTreeMap::new();
        for result in results.clone() {
            *archetypes.entry(result.archetype_key.clone()).or_insert(0) += 1;
        }

        let trait_means = (respondents > 0).then(|| {
            let mut totals = TraitMap::splat(0.0_f64);
            for result in results.clone() {
                for (id, &score) in result.traits.iter() {
                    totals[id] += f64::from(score);
                }
            }
            totals.map(|_, total| total / respondents as f64)
        });

        let positive_affect_mean = mean(
            results
                .clone()
                .filter_map(|r| r.affect.positive.map(f64::from)),
        );
        let negative_affect_mean =
            mean(results.filter_map(|r| r.affect.negative.map(f64::from)));

        Self {
            respondents,
            suspect,
            archetypes,
            trait_means,
            positive_affect_mean,
            negative_affect_mean,
        }
    }
}
