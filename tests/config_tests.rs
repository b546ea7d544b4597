use rstest::rstest;
use schedforge::config::{FitnessWeights, GaParams};
use schedforge::error::SchedForgeError;
use std::io::Write;

#[test]
fn test_defaults_are_valid() {
    assert!(GaParams::default().validate().is_ok());
}

#[rstest]
#[case::zero_population(GaParams { population_size: 0, ..GaParams::default() })]
#[case::negative_rate(GaParams { mutation_rate: -0.1, ..GaParams::default() })]
#[case::rate_above_one(GaParams { mutation_rate: 1.5, ..GaParams::default() })]
#[case::min_exceeds_max(GaParams { min_generations: 10, max_generations: 5, ..GaParams::default() })]
#[case::negative_threshold(GaParams { improvement_threshold: -1.0, ..GaParams::default() })]
#[case::floor_above_rate(GaParams { mutation_rate: 0.01, min_mutation_rate: 0.05, ..GaParams::default() })]
fn test_invalid_params_rejected(#[case] params: GaParams) {
    let err = params.validate().unwrap_err();
    assert!(matches!(err, SchedForgeError::Config(_)), "got {err:?}");
}

#[test]
fn test_min_equal_max_generations_allowed() {
    let params = GaParams {
        min_generations: 50,
        max_generations: 50,
        ..GaParams::default()
    };
    assert!(params.validate().is_ok());
}

#[test]
fn test_zero_mutation_rate_allowed() {
    let params = GaParams {
        mutation_rate: 0.0,
        min_mutation_rate: 0.0,
        ..GaParams::default()
    };
    assert!(params.validate().is_ok());
}

#[test]
fn test_partial_weight_profile_keeps_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"penalty_room_conflict": 1.0, "time_preferences": true}}"#
    )
    .unwrap();

    let weights = FitnessWeights::load_from_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(weights.penalty_room_conflict, 1.0);
    assert!(weights.time_preferences);
    // Everything unmentioned stays at its default.
    assert_eq!(weights.bonus_preferred_facilitator, 0.5);
    assert_eq!(weights.penalty_underload, 0.4);
    assert!(!weights.equipment);
}

#[test]
fn test_weight_profile_missing_file_is_io_error() {
    let err = FitnessWeights::load_from_file("/nonexistent/weights.json").unwrap_err();
    assert!(matches!(err, SchedForgeError::Io(_)));
}

#[test]
fn test_weight_profile_malformed_json_is_json_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{not json").unwrap();

    let err = FitnessWeights::load_from_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(matches!(err, SchedForgeError::Json(_)));
}
