use super::fixtures::{step, v60_recipe, v60_version};
use super::*;
use crate::error::BrewError;

#[test]
fn test_step_type_round_trips_through_str() {
    for step_type in [
        StepType::Prep,
        StepType::Pour,
        StepType::Wait,
        StepType::Stir,
        StepType::Press,
        StepType::Serve,
    ] {
        assert_eq!(step_type.as_str().parse::<StepType>(), Ok(step_type));
    }
    assert_eq!("POUR".parse::<StepType>(), Ok(StepType::Pour));
    assert!("bloom".parse::<StepType>().is_err());
}

#[test]
fn test_fallback_duration_by_type() {
    assert_eq!(StepType::Pour.fallback_duration_sec(), 18);
    assert_eq!(StepType::Wait.fallback_duration_sec(), 30);
    assert_eq!(StepType::Serve.fallback_duration_sec(), 30);
}

#[test]
fn test_step_serializes_type_tag_and_nulls() {
    let json = serde_json::to_value(step(0, StepType::Stir, "Stir gently")).unwrap();
    assert_eq!(json["type"], "stir");
    assert_eq!(json["stepOrder"], 0);
    assert!(json["targetWaterGrams"].is_null());
    assert!(json["windowEndSec"].is_null());
}

#[test]
fn test_active_version_falls_back_to_first() {
    let mut recipe = v60_recipe();
    recipe.active_version_id = "missing".to_string();
    assert_eq!(recipe.active_version().map(|v| v.id.as_str()), Some("test-v1"));
}

#[test]
fn test_refresh_derived_uses_active_version() {
    let mut recipe = v60_recipe();
    recipe.difficulty = Difficulty::Advanced;
    recipe.brew_time_min = 99;
    recipe.refresh_derived();

    // 5 steps: 25 + 45 + 30 + 25 + 60 = 185s -> 3 minutes
    assert_eq!(recipe.difficulty, Difficulty::Easy);
    assert_eq!(recipe.brew_time_min, 3);
}

#[test]
fn test_brew_time_estimate_has_two_minute_floor() {
    let steps = vec![step(0, StepType::Pour, "Pour it all")];
    assert_eq!(estimate_brew_time_min(&steps), 2);
}

#[test]
fn test_version_ratio() {
    let version = v60_version();
    assert!((version.ratio() - 350.0 / 22.0).abs() < f64::EPSILON);
}

#[test]
fn test_valid_recipe_passes_validation() {
    assert!(v60_recipe().validate().is_ok());
}

#[test]
fn test_validation_rejects_short_title() {
    let mut recipe = v60_recipe();
    recipe.title = "V".to_string();
    let err = recipe.validate().unwrap_err();
    assert!(matches!(err, BrewError::InvalidInput { ref field, .. } if field == "title"));
}

#[test]
fn test_validation_rejects_temperature_out_of_range() {
    let mut recipe = v60_recipe();
    recipe.versions[0].target_temp_c = 65.0;
    let err = recipe.validate().unwrap_err();
    assert!(matches!(err, BrewError::InvalidInput { ref field, .. } if field == "target_temp_c"));
}

#[test]
fn test_validation_rejects_gapped_step_order() {
    let mut recipe = v60_recipe();
    recipe.versions[0].steps[2].step_order = 7;
    let err = recipe.validate().unwrap_err();
    assert!(matches!(err, BrewError::InvalidInput { ref field, .. } if field == "step_order"));
}

#[test]
fn test_validation_rejects_unknown_active_version() {
    let mut recipe = v60_recipe();
    recipe.active_version_id = "nope".to_string();
    assert!(recipe.validate().is_err());
}

#[test]
fn test_validation_rejects_empty_steps() {
    let mut recipe = v60_recipe();
    recipe.versions[0].steps.clear();
    assert!(recipe.validate().is_err());
}

#[test]
fn test_difficulty_parse() {
    assert_eq!("medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
    assert_eq!(Difficulty::Advanced.as_str(), "Advanced");
}
