use sociotype::{
    CohortSummary, Engine, ResponseSet, SchemaLoader, ScoringSchema, Submission, TraitId,
};
use std::io::Write;

/// Deterministic spread of answers over every non-ordinal item.
fn patterned(schema: &ScoringSchema, seed: usize) -> ResponseSet {
    let mut responses = ResponseSet::new();
    for (i, item) in schema.items.iter().enumerate() {
        if schema.ordinal_map(&item.field).is_some() {
            continue;
        }
        let value = ((i * 7 + seed * 3) % 5 + 1) as i64;
        responses.insert(item.field.clone(), value);
    }
    responses
}

#[test]
fn scoring_is_deterministic() {
    let engine = Engine::builtin();
    let responses = patterned(engine.schema(), 4)
        .with("social_frequency", "Often")
        .with("friendship_ease", "Neutral");

    let first = engine.run(&responses, Some(180.0));
    let second = engine.run(&responses, Some(180.0));
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn no_answers_means_neutral_profile_and_default_archetype() {
    let engine = Engine::builtin();
    let responses = ResponseSet::new()
        .with("belonging", "skip")
        .with("overthinking", 0)
        .with("social_frequency", "Sometimes-ish");
    let result = engine.run(&responses, None);

    for id in TraitId::ALL {
        assert_eq!(result.traits[id], 50, "{} should be neutral", id);
        assert_eq!(result.ranges[id].max, 0.0);
    }
    assert_eq!(result.archetype_key, engine.schema().default_archetype);
}

#[test]
fn scores_stay_in_range() {
    let engine = Engine::builtin();
    for seed in 0..25 {
        let result = engine.run(&patterned(engine.schema(), seed), Some(120.0));
        for (id, score) in result.traits.iter() {
            assert!(*score <= 100, "seed {} trait {} scored {}", seed, id, score);
        }
        assert!(engine.schema().archetype(&result.archetype_key).is_some());
    }
}

#[test]
fn exempt_trait_moves_with_answer_on_reversed_item() {
    let engine = Engine::builtin();

    let agree = engine.run(&ResponseSet::new().with("overthinking", 5), None);
    assert_eq!(agree.traits[TraitId::CognitiveReflection], 100);
    assert_eq!(agree.traits[TraitId::EmotionalRegulation], 0);

    let disagree = engine.run(&ResponseSet::new().with("overthinking", 1), None);
    assert_eq!(disagree.traits[TraitId::CognitiveReflection], 0);
    assert_eq!(disagree.traits[TraitId::EmotionalRegulation], 100);
}

#[test]
fn suspect_flags_follow_time_and_completeness() {
    let engine = Engine::builtin();
    let schema = engine.schema();
    let total = schema.items.len();
    let numeric: Vec<&str> = schema
        .items
        .iter()
        .filter(|item| schema.ordinal_map(&item.field).is_none())
        .map(|item| item.field.as_str())
        .collect();

    let answering = |n: usize| -> ResponseSet {
        numeric.iter().take(n).map(|field| (*field, 3)).collect()
    };

    let complete = answering(numeric.len());
    assert!(engine.run(&complete, Some(29.0)).suspect);
    assert!(!engine.run(&complete, Some(31.0)).suspect);

    // Smallest count that reaches 60% of the scored items.
    let passing = (total * 3).div_ceil(5);
    assert!(!engine.run(&answering(passing), Some(31.0)).suspect);
    assert!(engine.run(&answering(passing - 1), Some(31.0)).suspect);
}

#[test]
fn submission_json_end_to_end() {
    let submission: Submission = serde_json::from_str(
        r#"{
            "completion_time_seconds": 305,
            "social_frequency": "Very Often",
            "conversation_initiator": "I usually start",
            "initiation_anxiety": "1",
            "avoidance": 1,
            "social_expansion_desire": 5,
            "first_interaction_comfort": "Comfortable",
            "panas_1": 4,
            "fs_classes": true
        }"#,
    )
    .unwrap();
    let engine = Engine::builtin();
    let result = engine.run_submission(&submission);

    assert!(result.traits[TraitId::SocialInitiative] > 50);
    assert!(!result.quality.too_fast);
    assert_eq!(result.affect.positive, None);

    let json = serde_json::to_value(&result).unwrap();
    for key in [
        "traits",
        "ranked",
        "archetype_key",
        "archetype",
        "insight",
        "suspect",
        "quality",
        "affect",
        "raw",
        "ranges",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(json["traits"].as_object().unwrap().len(), TraitId::COUNT);
}

#[test]
fn custom_schema_file_drives_scoring() {
    let mut schema = ScoringSchema::builtin().clone();
    schema.items.retain(|item| item.field == "belonging");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&schema).unwrap().as_bytes())
        .unwrap();
    let loaded = SchemaLoader::load_from_path(file.path()).unwrap();
    let engine = Engine::new(loaded).unwrap();

    let result = engine.run(&ResponseSet::new().with("belonging", 5), Some(60.0));
    assert_eq!(result.quality.total, 1);
    assert_eq!(result.traits[TraitId::SelfInsight], 100);
    assert_eq!(result.traits[TraitId::PsychologicalFlexibility], 100);
    assert_eq!(result.traits[TraitId::GoalPersistence], 50);
}

#[test]
fn batch_matches_sequential_and_summarises() {
    let engine = Engine::builtin();
    let submissions: Vec<Submission> = (0..12)
        .map(|seed| Submission::new(patterned(engine.schema(), seed), Some(90.0)))
        .collect();

    let parallel = engine.run_batch(&submissions, 4).unwrap();
    let sequential: Vec<_> = submissions
        .iter()
        .map(|s| engine.run_submission(s))
        .collect();
    assert_eq!(parallel, sequential);

    let summary = CohortSummary::from_results(&parallel);
    assert_eq!(summary.respondents, 12);
    assert_eq!(summary.archetypes.values().sum::<usize>(), 12);
    assert!(summary.positive_affect_mean.is_some());
}
