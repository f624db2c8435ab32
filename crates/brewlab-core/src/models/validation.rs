//! Structural validation applied before a recipe is persisted.
//!
//! The planner never validates; it consumes steps in the order given. These
//! checks belong to the repository layer and run on every save.

use std::collections::HashSet;

use super::{Recipe, RecipeStep, RecipeVersion};
use crate::error::{BrewError, Result};

const MIN_TEMP_C: f64 = 70.0;
const MAX_TEMP_C: f64 = 100.0;

fn min_len(field: &str, value: &str, min: usize) -> Result<()> {
    if value.trim().chars().count() < min {
        return Err(BrewError::invalid_input(field)
            .with_reason(format!("must be at least {min} characters")));
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(BrewError::invalid_input(field).with_reason("must be greater than 0"));
    }
    Ok(())
}

impl Recipe {
    /// Checks the recipe against the persisted-shape rules.
    pub fn validate(&self) -> Result<()> {
        min_len("id", &self.id, 1)?;
        min_len("slug", &self.slug, 1)?;
        min_len("title", &self.title, 2)?;
        min_len("brewer", &self.brewer, 2)?;
        min_len("description", &self.description, 4)?;
        min_len("quote", &self.quote, 2)?;
        min_len("cover_image_url", &self.cover_image_url, 1)?;

        if self.versions.is_empty() {
            return Err(BrewError::invalid_input("versions").with_reason("at least one version is required"));
        }
        if !self.versions.iter().any(|v| v.id == self.active_version_id) {
            return Err(BrewError::invalid_input("active_version_id").with_reason(format!(
                "'{}' does not match any version",
                self.active_version_id
            )));
        }

        let mut version_ids = HashSet::new();
        for version in &self.versions {
            if !version_ids.insert(version.id.as_str()) {
                return Err(BrewError::invalid_input("versions")
                    .with_reason(format!("duplicate version id '{}'", version.id)));
            }
            version.validate()?;
        }
        Ok(())
    }
}

impl RecipeVersion {
    pub fn validate(&self) -> Result<()> {
        min_len("version.id", &self.id, 1)?;
        if self.version_number == 0 {
            return Err(BrewError::invalid_input("version_number").with_reason("must be positive"));
        }
        positive("base_water_grams", self.base_water_grams)?;
        positive("base_dose_grams", self.base_dose_grams)?;
        if !(MIN_TEMP_C..=MAX_TEMP_C).contains(&self.target_temp_c) {
            return Err(BrewError::invalid_input("target_temp_c")
                .with_reason(format!("must be between {MIN_TEMP_C} and {MAX_TEMP_C}")));
        }
        min_len("grind_label", &self.grind_label, 2)?;
        if self.equipment.iter().any(|item| item.trim().is_empty()) {
            return Err(BrewError::invalid_input("equipment").with_reason("entries must not be empty"));
        }
        if self.steps.is_empty() {
            return Err(BrewError::invalid_input("steps").with_reason("at least one step is required"));
        }

        let mut orders: Vec<u32> = self.steps.iter().map(|step| step.step_order).collect();
        orders.sort_unstable();
        if orders.iter().enumerate().any(|(index, order)| *order as usize != index) {
            return Err(BrewError::invalid_input("step_order")
                .with_reason("step orders must be unique and contiguous from 0"));
        }

        self.steps.iter().try_for_each(RecipeStep::validate)
    }
}

impl RecipeStep {
    pub fn validate(&self) -> Result<()> {
        min_len("step.id", &self.id, 1)?;
        min_len("instruction", &self.instruction, 2)?;
        if let Some(grams) = self.target_water_grams {
            if !grams.is_finite() || grams < 0.0 {
                return Err(BrewError::invalid_input("target_water_grams")
                    .with_reason("must be a non-negative number"));
            }
        }
        Ok(())
    }
}
