//! Scoring Engine - responses in, profile out
//!
//! The pipeline is a straight line of pure steps over an immutable schema:
//!
//! 1. `resolve`   - raw answer → 1-5 scale point or nothing
//! 2. `aggregate` - weighted, centred sums per trait → 0-100 scores
//! 3. `classify`  - top-two dominance → archetype key
//! 4. `insight`   - template sentences for the profile
//! 5. `quality`   - advisory low-effort checks
//!
//! [`Engine`] ties the steps together and is safe to share across threads.

pub mod affect;
pub mod aggregate;
pub mod classify;
pub mod insight;
pub mod quality;
pub mod resolve;

pub use affect::AffectScores;
pub use aggregate::{Aggregate, TraitRange};
pub use insight::InsightBundle;
pub use quality::QualityReport;

use crate::response::{ResponseSet, Submission};
use crate::schema::{Archetype, SchemaError, ScoringSchema, TraitId, TraitMap, TraitVector};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, instrument};

static BUILTIN_ENGINE: LazyLock<Engine> = LazyLock::new(|| {
    Engine::from_schema(Arc::new(ScoringSchema::builtin().clone()))
        .expect("built-in schema declares its default archetype")
});

/// One trait in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTrait {
    pub id: TraitId,
    pub label: String,
    pub description: String,
    pub score: u8,
}

/// Everything produced for one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResult {
    pub traits: TraitVector,
    /// Highest score first.
    pub ranked: Vec<RankedTrait>,
    pub archetype_key: String,
    pub archetype: Archetype,
    pub insight: InsightBundle,
    pub suspect: bool,
    pub quality: QualityReport,
    pub affect: AffectScores,
    pub raw: TraitMap<f64>,
    pub ranges: TraitMap<TraitRange>,
}

/// Scores submissions against one schema.
#[derive(Debug, Clone)]
pub struct Engine {
    schema: Arc<ScoringSchema>,
    default_archetype: Archetype,
}

impl Engine {
    /// Validate `schema` and build an engine over it.
    pub fn new(schema: ScoringSchema) -> Result<Self, SchemaError> {
        schema.validate()?;
        Self::from_schema(Arc::new(schema))
    }

    /// Engine over the embedded schema. Cheap: the schema is shared.
    pub fn builtin() -> Self {
        BUILTIN_ENGINE.clone()
    }

    fn from_schema(schema: Arc<ScoringSchema>) -> Result<Self, SchemaError> {
        let default_archetype = schema
            .archetype(&schema.default_archetype)
            .cloned()
            .ok_or_else(|| SchemaError::MissingDefaultArchetype(schema.default_archetype.clone()))?;
        Ok(Self {
            schema,
            default_archetype,
        })
    }

    pub fn schema(&self) -> &ScoringSchema {
        &self.schema
    }

    /// Score one response set. Never fails: missing data is skipped and
    /// unmapped profiles fall back to the default archetype.
    #[instrument(skip(self, responses), fields(answers = responses.len()))]
    pub fn run(&self, responses: &ResponseSet, completion_seconds: Option<f64>) -> ScoringResult {
        let schema = self.schema.as_ref();

        let Aggregate {
            scores,
            raw,
            ranges,
        } = aggregate::aggregate(responses, schema);
        let archetype_key = classify::classify(&scores, schema);
        let archetype = schema
            .archetype(&archetype_key)
            .unwrap_or(&self.default_archetype)
            .clone();
        let insight = insight::compose(&scores, &archetype_key, schema);
        let quality = QualityReport::assess(responses, completion_seconds, schema);
        let affect = affect::affect(responses, schema);

        let ranked = classify::by_score(&scores)
            .into_iter()
            .map(|id| {
                let profile = schema.traits.get(id);
                RankedTrait {
                    id,
                    label: profile.label.clone(),
                    description: profile.description.clone(),
                    score: scores[id],
                }
            })
            .collect();

        debug!(
            archetype = %archetype_key,
            suspect = quality.suspect,
            answered = quality.answered,
            "scored submission"
        );

        ScoringResult {
            traits: scores,
            ranked,
            archetype_key,
            archetype,
            insight,
            suspect: quality.suspect,
            quality,
            affect,
            raw,
            ranges,
        }
    }

    pub fn run_submission(&self, submission: &Submission) -> ScoringResult {
        self.run(&submission.responses, submission.completion_time_seconds)
    }

    /// Score many submissions in parallel. Output order matches input order.
    /// `workers == 0` uses one thread per CPU.
    #[instrument(skip(self, submissions), fields(count = submissions.len()))]
    pub fn run_batch(
        &self,
        submissions: &[Submission],
        workers: usize,
    ) -> Result<Vec<ScoringResult>, rayon::ThreadPoolBuildError> {
        let workers = worker_count(workers);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("sociotype-score-{}", i))
            .build()?;

        let results: Vec<ScoringResult> = pool.install(|| {
            submissions
                .par_iter()
                .map(|submission| self.run_submission(submission))
                .collect()
        });

        info!(
            workers,
            scored = results.len(),
            suspect = results.iter().filter(|r| r.suspect).count(),
            "batch scored"
        );
        Ok(results)
    }
}

/// Threads for a batch pool: `requested`, or one per CPU when it is 0.
fn worker_count(requested: usize) -> usize {
    if requested == 0 {
        num_cpus::get()
    } else {
        requested
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Score one response set with the built-in schema.
pub fn run(responses: &ResponseSet, completion_seconds: Option<f64>) -> ScoringResult {
    BUILTIN_ENGINE.run(responses, completion_seconds)
}
