//! Deterministic scoring for the social-identity survey.
//!
//! A [`ResponseSet`] goes through the [`Engine`] against a [`ScoringSchema`]
//! and comes out as a [`ScoringResult`]: seven trait scores on a 0–100
//! scale, an archetype, template-driven insight text and advisory quality
//! flags. The engine does no I/O and keeps no mutable state, so one instance
//! can score concurrently from any number of threads.
//!
//! ```no_run
//! use sociotype::{Engine, ResponseSet};
//!
//! let engine = Engine::builtin();
//! let responses = ResponseSet::new()
//!     .with("belonging", 4)
//!     .with("social_frequency", "Often");
//! let result = engine.run(&responses, Some(240.0));
//! println!("{}", result.archetype.title);
//! ```

pub mod cohort;
pub mod engine;
pub mod response;
pub mod schema;
pub mod settings;

pub use cohort::CohortSummary;
pub use engine::{
    run, AffectScores, Engine, InsightBundle, QualityReport, RankedTrait, ScoringResult,
    TraitRange,
};
pub use response::{AnswerValue, ResponseSet, Submission};
pub use schema::{
    Archetype, ItemWeightSpec, SchemaError, SchemaLoader, ScoringSchema, TraitId, TraitMap,
    TraitVector,
};
pub use settings::Settings;
