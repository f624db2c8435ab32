//! Builders for test recipes shared by unit tests across modules.

use jiff::Timestamp;

use super::{Difficulty, Recipe, RecipeStep, RecipeVersion, StepType};

pub(crate) fn step(order: u32, step_type: StepType, instruction: &str) -> RecipeStep {
    RecipeStep {
        id: format!("test-step-{}", order + 1),
        version_id: "test-v1".to_string(),
        step_order: order,
        step_type,
        instruction: instruction.to_string(),
        target_water_grams: None,
        duration_sec: None,
        window_start_sec: None,
        window_end_sec: None,
        tips: None,
    }
}

pub(crate) fn timed(order: u32, step_type: StepType, instruction: &str, duration: Option<u32>) -> RecipeStep {
    RecipeStep {
        duration_sec: duration,
        ..step(order, step_type, instruction)
    }
}

pub(crate) fn pour(order: u32, target: f64, duration: Option<u32>) -> RecipeStep {
    RecipeStep {
        target_water_grams: Some(target),
        duration_sec: duration,
        ..step(order, StepType::Pour, &format!("Pour to {target}g"))
    }
}

/// A V60-style version: 350 g water, 22 g coffee, heat + rinse prep.
pub(crate) fn v60_version() -> RecipeVersion {
    RecipeVersion {
        id: "test-v1".to_string(),
        recipe_id: "test".to_string(),
        version_number: 1,
        base_water_grams: 350.0,
        base_dose_grams: 22.0,
        target_temp_c: 96.0,
        grind_label: "Medium-fine".to_string(),
        notes: String::new(),
        equipment: vec!["Hario V60".to_string(), "Scale".to_string()],
        steps: vec![
            step(0, StepType::Prep, "Heat water and rinse the filter"),
            pour(1, 60.0, Some(45)),
            pour(2, 210.0, Some(30)),
            pour(3, 350.0, None),
            timed(4, StepType::Wait, "Let it draw down", Some(60)),
        ],
        created_at: Timestamp::from_second(1704067200).unwrap(),
    }
}

pub(crate) fn v60_recipe() -> Recipe {
    let version = v60_version();
    Recipe {
        id: "test".to_string(),
        owner_id: Some("owner-1".to_string()),
        slug: "test-v60".to_string(),
        title: "Test V60".to_string(),
        brewer: "Hario V60".to_string(),
        description: "A test recipe".to_string(),
        quote: "Brew well".to_string(),
        cover_image_url: "/assets/images/HarioV60.png".to_string(),
        is_public: false,
        difficulty: Difficulty::Easy,
        brew_time_min: 3,
        active_version_id: version.id.clone(),
        versions: vec![version],
        created_at: Timestamp::from_second(1704067200).unwrap(),
        updated_at: Timestamp::from_second(1704067200).unwrap(),
    }
}
