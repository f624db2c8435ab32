//! Proportional rescaling of a recipe version to a new water mass and ratio.

use serde::{Deserialize, Serialize};

use crate::models::{RecipeStep, RecipeVersion};

/// Target water mass and water:dose ratio for a scaled brew.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleOptions {
    pub target_water_grams: f64,
    pub target_ratio: f64,
}

impl ScaleOptions {
    /// Options that reproduce the version unchanged.
    pub fn for_version(version: &RecipeVersion) -> Self {
        Self {
            target_water_grams: version.base_water_grams,
            target_ratio: version.ratio(),
        }
    }
}

/// Floors a possibly non-numeric or negative input at 1.
fn at_least_one(value: f64) -> f64 {
    if value.is_finite() {
        value.max(1.0)
    } else {
        1.0
    }
}

/// Produces a new version with base water, base dose and every pour target
/// rescaled. Inputs are clamped rather than rejected, so this never fails.
///
/// ```rust
/// # use brewlab_core::brew::{scale_recipe_version, ScaleOptions};
/// # fn demo(version: &brewlab_core::models::RecipeVersion) {
/// let scaled = scale_recipe_version(
///     version,
///     ScaleOptions { target_water_grams: 500.0, target_ratio: 15.0 },
/// );
/// assert_eq!(scaled.base_water_grams, 500.0);
/// # }
/// ```
pub fn scale_recipe_version(version: &RecipeVersion, options: ScaleOptions) -> RecipeVersion {
    let water = at_least_one(options.target_water_grams).round();
    let ratio = at_least_one(options.target_ratio);
    let dose = at_least_one(water / ratio).round();
    let factor = water / at_least_one(version.base_water_grams);

    let steps = version
        .steps
        .iter()
        .map(|step| RecipeStep {
            target_water_grams: step.target_water_grams.map(|grams| (grams * factor).round()),
            ..step.clone()
        })
        .collect();

    RecipeVersion {
        base_water_grams: water,
        base_dose_grams: dose,
        steps,
        ..version.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::v60_version;

    #[test]
    fn test_scales_water_dose_and_targets() {
        let version = v60_version();
        let scaled = scale_recipe_version(
            &version,
            ScaleOptions {
                target_water_grams: 500.0,
                target_ratio: 15.0,
            },
        );

        assert_eq!(scaled.base_water_grams, 500.0);
        assert_eq!(scaled.base_dose_grams, 33.0);

        for (original, scaled) in version.steps.iter().zip(&scaled.steps) {
            let expected = original
                .target_water_grams
                .map(|target| ((500.0 / 350.0) * target).round());
            assert_eq!(scaled.target_water_grams, expected);
        }
        assert_eq!(scaled.steps[1].target_water_grams, Some(86.0));
        assert_eq!(scaled.steps[3].target_water_grams, Some(500.0));
    }

    #[test]
    fn test_leaves_untargeted_steps_and_metadata_alone() {
        let version = v60_version();
        let scaled = scale_recipe_version(
            &version,
            ScaleOptions {
                target_water_grams: 250.0,
                target_ratio: 16.0,
            },
        );
        assert_eq!(scaled.steps[0].target_water_grams, None);
        assert_eq!(scaled.steps[4].target_water_grams, None);
        assert_eq!(scaled.id, version.id);
        assert_eq!(scaled.target_temp_c, version.target_temp_c);
        assert_eq!(scaled.steps.len(), version.steps.len());
    }

    #[test]
    fn test_clamps_invalid_inputs() {
        let version = v60_version();
        let scaled = scale_recipe_version(
            &version,
            ScaleOptions {
                target_water_grams: -40.0,
                target_ratio: f64::NAN,
            },
        );
        assert_eq!(scaled.base_water_grams, 1.0);
        assert_eq!(scaled.base_dose_grams, 1.0);
    }

    #[test]
    fn test_ratio_below_one_is_floored() {
        let version = v60_version();
        let scaled = scale_recipe_version(
            &version,
            ScaleOptions {
                target_water_grams: 300.0,
                target_ratio: 0.25,
            },
        );
        assert_eq!(scaled.base_dose_grams, 300.0);
    }

    #[test]
    fn test_default_options_reproduce_version() {
        let version = v60_version();
        let scaled = scale_recipe_version(&version, ScaleOptions::for_version(&version));
        assert_eq!(scaled, version);
    }

    #[test]
    fn test_source_version_is_not_mutated() {
        let version = v60_version();
        let before = version.clone();
        let _ = scale_recipe_version(
            &version,
            ScaleOptions {
                target_water_grams: 700.0,
                target_ratio: 17.0,
            },
        );
        assert_eq!(version, before);
    }
}
