//! Recipe step model.

use serde::{Deserialize, Serialize};

use super::StepType;

/// One action within a recipe version.
///
/// Steps are never edited in place; an edit produces a replacement step
/// carrying the same `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    /// Unique identifier for the step
    pub id: String,

    /// ID of the owning recipe version
    pub version_id: String,

    /// Zero-based position within the version
    pub step_order: u32,

    /// Kind of action this step represents
    #[serde(rename = "type")]
    pub step_type: StepType,

    /// Free-text instruction shown to the brewer
    pub instruction: String,

    /// Cumulative grams of water expected in the vessel by the end of the step
    #[serde(default)]
    pub target_water_grams: Option<f64>,

    /// How long the step lasts
    #[serde(default)]
    pub duration_sec: Option<u32>,

    /// Explicit offset at which the step starts
    #[serde(default)]
    pub window_start_sec: Option<u32>,

    /// Explicit offset at which the step ends
    #[serde(default)]
    pub window_end_sec: Option<u32>,

    #[serde(default)]
    pub tips: Option<String>,
}

impl RecipeStep {
    /// Pour target, if the step has a usable (finite, non-negative) one.
    pub fn pour_target(&self) -> Option<f64> {
        self.target_water_grams
            .filter(|grams| grams.is_finite() && *grams >= 0.0)
    }
}
