//! Seed recipes built from the legacy brew-card format, and the blank draft
//! template new recipes start from.
//!
//! A legacy card is a loose, human-written record: a `/`-separated spec
//! string ("22g coffee / 350g water / Hario V60"), numbered instruction
//! strings, and a quote. Quantities, durations, step types and temperature
//! are all recovered from the text.

use std::{collections::BTreeMap, sync::LazyLock};

use jiff::Timestamp;
use regex::Regex;
use serde::Deserialize;

use crate::{
    error::Result,
    models::{estimate_brew_time_min, Difficulty, Recipe, RecipeStep, RecipeVersion, StepType},
};

const LEGACY_CARDS_JSON: &str = include_str!("../assets/legacy_cards.json");

/// 2024-01-01T00:00:00Z, the creation time stamped on every seed.
const SEED_EPOCH_SECOND: i64 = 1_704_067_200;

const DEFAULT_WATER_GRAMS: f64 = 350.0;
const DEFAULT_DOSE_GRAMS: f64 = 22.0;
const DEFAULT_TEMP_C: f64 = 96.0;
const GRAMS_PER_CUP: f64 = 236.6;
const GRAMS_PER_TABLESPOON: f64 = 5.3;

/// Cover images offered to recipe authors.
pub const PRESET_IMAGES: [&str; 7] = [
    "/assets/images/Chemex.png",
    "/assets/images/Clever.png",
    "/assets/images/AeroPress.png",
    "/assets/images/FrenchPress.png",
    "/assets/images/KalitaWave.png",
    "/assets/images/HarioV60.png",
    "/assets/images/MrCoffee.png",
];

static WATER_GRAMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*g\s*water").expect("valid regex"));
static WATER_CUPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*cups?\s*of\s*water").expect("valid regex"));
static DOSE_GRAMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*g\s*coffee").expect("valid regex"));
static DOSE_TABLESPOONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*tablespoons?\s*of\s*coffee").expect("valid regex")
});
static CLOCK_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*:\s*(\d+)").expect("valid regex"));
static MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*minutes?").expect("valid regex"));
static SECONDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*seconds?").expect("valid regex"));
static TARGET_GRAMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*g\b").expect("valid regex"));
static FAHRENHEIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*°f").expect("valid regex"));
static SLUG_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("valid regex"));

/// One card of the legacy seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyCard {
    pub name: String,
    pub image: String,
    pub recipe: String,
    /// Instructions keyed "1".."n"
    pub instructions: BTreeMap<String, String>,
    pub quote: String,
}

/// Parses the embedded seed cards into recipes.
pub fn seed_recipes() -> Result<Vec<Recipe>> {
    let cards: Vec<LegacyCard> = serde_json::from_str(LEGACY_CARDS_JSON)?;
    Ok(cards.iter().map(recipe_from_card).collect())
}

pub fn slugify(input: &str) -> String {
    let lower = input.trim().to_lowercase();
    let stripped = SLUG_STRIP.replace_all(&lower, "");
    WHITESPACE.replace_all(&stripped, "-").into_owned()
}

fn first_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

pub fn parse_water_grams(spec: &str) -> f64 {
    first_number(&WATER_GRAMS, spec)
        .map(f64::round)
        .or_else(|| first_number(&WATER_CUPS, spec).map(|cups| (cups * GRAMS_PER_CUP).round()))
        .unwrap_or(DEFAULT_WATER_GRAMS)
}

pub fn parse_dose_grams(spec: &str) -> f64 {
    first_number(&DOSE_GRAMS, spec)
        .map(f64::round)
        .or_else(|| {
            first_number(&DOSE_TABLESPOONS, spec).map(|tbsp| (tbsp * GRAMS_PER_TABLESPOON).round())
        })
        .unwrap_or(DEFAULT_DOSE_GRAMS)
}

/// `M:SS` wins over spelled-out minutes and seconds, which are summed.
pub fn parse_duration_sec(instruction: &str) -> Option<u32> {
    if let Some(caps) = CLOCK_DURATION.captures(instruction) {
        let minutes: u32 = caps[1].parse().ok()?;
        let seconds: u32 = caps[2].parse().ok()?;
        return Some(minutes.saturating_mul(60).saturating_add(seconds));
    }

    let minutes = first_number(&MINUTES, instruction);
    let seconds = first_number(&SECONDS, instruction);
    if minutes.is_none() && seconds.is_none() {
        return None;
    }
    let total = minutes.unwrap_or(0.0) * 60.0 + seconds.unwrap_or(0.0);
    Some(total.round() as u32)
}

pub fn parse_target_grams(instruction: &str) -> Option<f64> {
    first_number(&TARGET_GRAMS, instruction).map(f64::round)
}

/// Keyword inference, first match wins. The opening step is always prep.
pub fn infer_step_type(instruction: &str, index: usize) -> StepType {
    let lower = instruction.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|word| lower.contains(word));

    if has(&["press", "plunge"]) {
        StepType::Press
    } else if has(&["stir"]) {
        StepType::Stir
    } else if index == 0 || has(&["heat", "grind", "filter"]) {
        StepType::Prep
    } else if has(&["wait", "timer", "brew", "drain"]) {
        StepType::Wait
    } else if has(&["bloom", "pour", "add", "water"]) {
        StepType::Pour
    } else if has(&["enjoy", "serve", "decant"]) {
        StepType::Serve
    } else {
        StepType::Prep
    }
}

fn cover_image_for(brewer: &str) -> &'static str {
    match brewer {
        "Chemex" => PRESET_IMAGES[0],
        "Clever Dripper" => PRESET_IMAGES[1],
        "Aeropress" => PRESET_IMAGES[2],
        "French Press" => PRESET_IMAGES[3],
        "Kalita Wave" => PRESET_IMAGES[4],
        "Hario V60" => PRESET_IMAGES[5],
        "Coffee Brewer" => PRESET_IMAGES[6],
        _ => PRESET_IMAGES[0],
    }
}

fn ordered_instructions(instructions: &BTreeMap<String, String>) -> Vec<&str> {
    let mut keyed: Vec<(u32, &str)> = instructions
        .iter()
        .map(|(key, text)| (key.trim().parse().unwrap_or(u32::MAX), text.as_str()))
        .collect();
    keyed.sort_by_key(|(order, _)| *order);
    keyed.into_iter().map(|(_, text)| text).collect()
}

fn equipment_from_spec(spec: &str) -> Vec<String> {
    spec.split('/')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter(|token| {
            let lower = token.to_lowercase();
            !lower.contains("water") && !lower.contains("coffee") && !DIGIT.is_match(token)
        })
        .map(String::from)
        .collect()
}

fn fahrenheit_to_celsius(instruction: &str) -> Option<f64> {
    first_number(&FAHRENHEIT, instruction).map(|f| ((f - 32.0) * 5.0 / 9.0).round())
}

pub fn recipe_from_card(card: &LegacyCard) -> Recipe {
    let slug = slugify(&card.name);
    let recipe_id = format!("seed-{slug}");
    let version_id = format!("{recipe_id}-v1");
    let seeded_at = Timestamp::from_second(SEED_EPOCH_SECOND).unwrap_or(Timestamp::UNIX_EPOCH);

    let steps: Vec<RecipeStep> = ordered_instructions(&card.instructions)
        .into_iter()
        .enumerate()
        .map(|(index, instruction)| RecipeStep {
            id: format!("{recipe_id}-step-{}", index + 1),
            version_id: version_id.clone(),
            step_order: index as u32,
            step_type: infer_step_type(instruction, index),
            instruction: instruction.to_string(),
            target_water_grams: parse_target_grams(instruction),
            duration_sec: parse_duration_sec(instruction),
            window_start_sec: None,
            window_end_sec: None,
            tips: None,
        })
        .collect();

    let target_temp_c = card
        .instructions
        .get("1")
        .and_then(|first| fahrenheit_to_celsius(first))
        .unwrap_or(DEFAULT_TEMP_C);

    let difficulty = Difficulty::from_step_count(steps.len());
    let brew_time_min = estimate_brew_time_min(&steps);

    let version = RecipeVersion {
        id: version_id.clone(),
        recipe_id: recipe_id.clone(),
        version_number: 1,
        base_water_grams: parse_water_grams(&card.recipe),
        base_dose_grams: parse_dose_grams(&card.recipe),
        target_temp_c,
        grind_label: "Medium".to_string(),
        notes: card.recipe.clone(),
        equipment: equipment_from_spec(&card.recipe),
        steps,
        created_at: seeded_at,
    };

    Recipe {
        id: recipe_id,
        owner_id: None,
        slug,
        title: card.name.clone(),
        brewer: card.name.clone(),
        description: format!(
            "Classic {} recipe with guided pour and timing targets.",
            card.name
        ),
        quote: card.quote.clone(),
        cover_image_url: cover_image_for(&card.name).to_string(),
        is_public: true,
        difficulty,
        brew_time_min,
        active_version_id: version_id,
        versions: vec![version],
        created_at: seeded_at,
        updated_at: seeded_at,
    }
}

/// A private three-step pour over draft for `owner_id`.
pub fn blank_recipe(recipe_id: &str, owner_id: &str, now: Timestamp) -> Recipe {
    let version_id = format!("{recipe_id}-v1");
    let step = |order: u32, step_type, instruction: &str| RecipeStep {
        id: format!("{recipe_id}-step-{}", order + 1),
        version_id: version_id.clone(),
        step_order: order,
        step_type,
        instruction: instruction.to_string(),
        target_water_grams: None,
        duration_sec: None,
        window_start_sec: None,
        window_end_sec: None,
        tips: None,
    };

    let steps = vec![
        RecipeStep {
            duration_sec: Some(45),
            tips: Some("Use hot water to preheat brewer and mug.".to_string()),
            ..step(0, StepType::Prep, "Heat water and rinse filter.")
        },
        RecipeStep {
            target_water_grams: Some(60.0),
            duration_sec: Some(30),
            tips: Some("Saturate all grounds evenly.".to_string()),
            ..step(1, StepType::Pour, "Add water to 60g for bloom.")
        },
        RecipeStep {
            target_water_grams: Some(350.0),
            ..step(2, StepType::Pour, "Continue pouring to final target.")
        },
    ];

    let slug_stem: String = recipe_id.chars().take(6).collect();
    let mut recipe = Recipe {
        id: recipe_id.to_string(),
        owner_id: Some(owner_id.to_string()),
        slug: format!("recipe-{slug_stem}"),
        title: "Untitled Brew Card".to_string(),
        brewer: "Pour Over".to_string(),
        description: "A custom brew recipe built in Brewlab.".to_string(),
        quote: "Dial it in and share it.".to_string(),
        cover_image_url: PRESET_IMAGES[0].to_string(),
        is_public: false,
        difficulty: Difficulty::Easy,
        brew_time_min: 0,
        active_version_id: version_id.clone(),
        versions: vec![RecipeVersion {
            id: version_id,
            recipe_id: recipe_id.to_string(),
            version_number: 1,
            base_water_grams: 350.0,
            base_dose_grams: 22.0,
            target_temp_c: 96.0,
            grind_label: "Medium".to_string(),
            notes: String::new(),
            equipment: ["Dripper", "Paper Filter", "Scale", "Timer"]
                .map(String::from)
                .to_vec(),
            steps,
            created_at: now,
        }],
        created_at: now,
        updated_at: now,
    };
    recipe.refresh_derived();
    recipe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hario V60"), "hario-v60");
        assert_eq!(slugify("  Clever  Dripper! "), "clever-dripper");
        assert_eq!(slugify("Café Olé"), "caf-ol");
    }

    #[test]
    fn test_quantities_from_spec() {
        assert_eq!(parse_water_grams("22g coffee / 350g water"), 350.0);
        assert_eq!(parse_water_grams("4 cups of water"), 946.0);
        assert_eq!(parse_water_grams("plenty of water"), 350.0);
        assert_eq!(parse_dose_grams("22g coffee / 350g water"), 22.0);
        assert_eq!(parse_dose_grams("4 tablespoons of coffee"), 21.0);
        assert_eq!(parse_dose_grams("a scoop"), 22.0);
    }

    #[test]
    fn test_durations() {
        assert_eq!(parse_duration_sec("Bloom with 60g water for 0:45."), Some(45));
        assert_eq!(parse_duration_sec("Wait 1:30, then press"), Some(90));
        assert_eq!(parse_duration_sec("Let it brew for 3 minutes."), Some(180));
        assert_eq!(parse_duration_sec("Steep 1 minute 30 seconds"), Some(90));
        assert_eq!(parse_duration_sec("Press gently for 30 seconds."), Some(30));
        assert_eq!(parse_duration_sec("Enjoy."), None);
    }

    #[test]
    fn test_target_is_first_gram_token() {
        assert_eq!(parse_target_grams("Pour to 210g in slow spirals"), Some(210.0));
        assert_eq!(parse_target_grams("Pour 50 g then 100 g"), Some(50.0));
        assert_eq!(parse_target_grams("Pour to the top"), None);
        assert_eq!(parse_target_grams("Use a 3 gallon jug"), None);
    }

    #[test]
    fn test_step_type_inference_order() {
        assert_eq!(infer_step_type("Anything at all", 0), StepType::Prep);
        assert_eq!(infer_step_type("Stir and then press", 3), StepType::Press);
        assert_eq!(infer_step_type("Stir three times", 3), StepType::Stir);
        assert_eq!(infer_step_type("Grind the beans", 2), StepType::Prep);
        assert_eq!(infer_step_type("Let it drain", 2), StepType::Wait);
        assert_eq!(infer_step_type("Add water to 60g", 2), StepType::Pour);
        assert_eq!(infer_step_type("Decant", 5), StepType::Serve);
        assert_eq!(infer_step_type("Smile", 5), StepType::Prep);
    }

    #[test]
    fn test_seed_cards_parse() {
        let seeds = seed_recipes().unwrap();
        assert_eq!(seeds.len(), 7);
        assert!(seeds.iter().all(|recipe| recipe.is_public && recipe.owner_id.is_none()));

        let v60 = seeds.iter().find(|recipe| recipe.slug == "hario-v60").unwrap();
        assert_eq!(v60.id, "seed-hario-v60");
        assert_eq!(v60.cover_image_url, "/assets/images/HarioV60.png");
        let version = v60.active_version().unwrap();
        assert_eq!(version.base_water_grams, 350.0);
        assert_eq!(version.base_dose_grams, 22.0);
        assert_eq!(version.target_temp_c, 93.0);
        // tokens with digits never count as equipment
        assert_eq!(version.equipment, vec!["Paper Filter", "Gooseneck Kettle"]);
        assert_eq!(version.steps[2].step_type, StepType::Pour);
        assert_eq!(version.steps[2].target_water_grams, Some(60.0));
        assert_eq!(version.steps[2].duration_sec, Some(45));
        assert_eq!(v60.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_seed_cards_validate() {
        for recipe in seed_recipes().unwrap() {
            recipe.validate().unwrap();
        }
    }

    #[test]
    fn test_imperial_seed_conversion() {
        let seeds = seed_recipes().unwrap();
        let press = seeds.iter().find(|recipe| recipe.slug == "french-press").unwrap();
        let version = press.active_version().unwrap();
        assert_eq!(version.base_water_grams, 946.0);
        assert_eq!(version.base_dose_grams, 21.0);
        assert_eq!(version.equipment, vec!["French Press", "Kettle"]);
    }

    #[test]
    fn test_blank_recipe_template() {
        let now = Timestamp::from_second(1_750_000_000).unwrap();
        let recipe = blank_recipe("abcdef123456", "owner-1", now);

        assert_eq!(recipe.slug, "recipe-abcdef");
        assert!(!recipe.is_public);
        assert!(recipe.is_owned_by("owner-1"));
        assert_eq!(recipe.active_version_id, "abcdef123456-v1");
        let version = recipe.active_version().unwrap();
        assert_eq!(version.steps.len(), 3);
        assert_eq!(version.steps[2].id, "abcdef123456-step-3");
        assert_eq!(recipe.brew_time_min, 2);
        recipe.validate().unwrap();
    }
}
