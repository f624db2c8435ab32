//! A recipe made ready to brew: scaled, classified, and scheduled.

use serde::Serialize;

use super::{
    format::to_ratio_label,
    plan::{build_step_plan, total_timeline_sec, PlannedStep},
    prep::{build_prep_checklist, partition_steps, PrepChecklistItem},
    scaling::{scale_recipe_version, ScaleOptions},
};
use crate::{
    error::{BrewError, Result},
    models::{Recipe, RecipeVersion},
};

/// Steps shown after the current one.
pub const UPCOMING_PREVIEW: usize = 3;

/// Everything a session needs from a recipe, derived once per scale change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewPlan {
    pub recipe_id: String,
    pub recipe_title: String,
    pub options: ScaleOptions,
    /// Active version after scaling
    pub version: RecipeVersion,
    pub checklist: Vec<PrepChecklistItem>,
    /// Timed brew steps; prep-like steps live in the checklist instead
    pub steps: Vec<PlannedStep>,
}

impl BrewPlan {
    /// Prepares the recipe's active version at the given scale, or at its
    /// own base scale when `options` is `None`.
    pub fn prepare(recipe: &Recipe, options: Option<ScaleOptions>) -> Result<Self> {
        let version = recipe.active_version().ok_or_else(|| {
            BrewError::invalid_input("versions").with_reason(format!(
                "recipe '{}' has no version to brew",
                recipe.slug
            ))
        })?;
        let options = options.unwrap_or_else(|| ScaleOptions::for_version(version));
        Ok(Self::from_version(&recipe.id, &recipe.title, version, options))
    }

    pub fn from_version(
        recipe_id: &str,
        recipe_title: &str,
        version: &RecipeVersion,
        options: ScaleOptions,
    ) -> Self {
        let scaled = scale_recipe_version(version, options);
        let (prep_steps, brew_steps) = partition_steps(&scaled.steps);
        let checklist = build_prep_checklist(&prep_steps, &scaled.steps, scaled.target_temp_c);
        let steps = build_step_plan(&brew_steps);

        Self {
            recipe_id: recipe_id.to_string(),
            recipe_title: recipe_title.to_string(),
            options,
            version: scaled,
            checklist,
            steps,
        }
    }

    pub fn total_timeline_sec(&self) -> u32 {
        total_timeline_sec(&self.steps)
    }

    pub fn current(&self, index: usize) -> Option<&PlannedStep> {
        self.steps.get(index)
    }

    /// Up to `count` steps following `index`.
    pub fn upcoming(&self, index: usize, count: usize) -> &[PlannedStep] {
        let start = (index + 1).min(self.steps.len());
        let end = start.saturating_add(count).min(self.steps.len());
        &self.steps[start..end]
    }

    pub fn ratio_label(&self) -> String {
        to_ratio_label(self.version.base_water_grams, self.version.base_dose_grams)
    }

    pub fn has_brew_steps(&self) -> bool {
        !self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{v60_recipe, v60_version};

    #[test]
    fn test_prepare_at_base_scale() {
        let plan = BrewPlan::prepare(&v60_recipe(), None).unwrap();

        assert_eq!(plan.version.base_water_grams, 350.0);
        assert_eq!(plan.version.base_dose_grams, 22.0);
        assert_eq!(plan.checklist.len(), 1);
        assert_eq!(plan.steps.len(), 4);
        assert_eq!(plan.total_timeline_sec(), 153);
        assert_eq!(plan.ratio_label(), "1:15.9");
    }

    #[test]
    fn test_prepare_scales_pour_targets() {
        let options = ScaleOptions {
            target_water_grams: 500.0,
            target_ratio: 15.0,
        };
        let plan = BrewPlan::prepare(&v60_recipe(), Some(options)).unwrap();

        assert_eq!(plan.version.base_dose_grams, 33.0);
        let targets: Vec<_> = plan.steps.iter().map(|p| p.step.target_water_grams).collect();
        assert_eq!(targets, vec![Some(86.0), Some(300.0), Some(500.0), None]);
        assert_eq!(plan.steps[1].pour_delta, Some(214.0));
    }

    #[test]
    fn test_upcoming_is_bounded() {
        let plan = BrewPlan::from_version("test", "Test", &v60_version(), ScaleOptions::for_version(&v60_version()));

        assert_eq!(plan.upcoming(0, UPCOMING_PREVIEW).len(), 3);
        assert_eq!(plan.upcoming(2, UPCOMING_PREVIEW).len(), 1);
        assert!(plan.upcoming(3, UPCOMING_PREVIEW).is_empty());
        assert!(plan.upcoming(10, UPCOMING_PREVIEW).is_empty());
    }

    #[test]
    fn test_recipe_without_versions_is_rejected() {
        let mut recipe = v60_recipe();
        recipe.versions.clear();
        assert!(matches!(
            BrewPlan::prepare(&recipe, None),
            Err(BrewError::InvalidInput { .. })
        ));
    }
}
