//! Lightweight listing view of a recipe.

use serde::Serialize;

use super::{Difficulty, Recipe};

/// One row of a recipe listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub slug: String,
    pub title: String,
    pub brewer: String,
    pub difficulty: Difficulty,
    pub brew_time_min: u32,
    pub is_public: bool,
    pub base_water_grams: Option<f64>,
    pub base_dose_grams: Option<f64>,
    pub step_count: usize,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        let version = recipe.active_version();
        Self {
            slug: recipe.slug.clone(),
            title: recipe.title.clone(),
            brewer: recipe.brewer.clone(),
            difficulty: recipe.difficulty,
            brew_time_min: recipe.brew_time_min,
            is_public: recipe.is_public,
            base_water_grams: version.map(|v| v.base_water_grams),
            base_dose_grams: version.map(|v| v.base_dose_grams),
            step_count: version.map_or(0, |v| v.steps.len()),
        }
    }
}
