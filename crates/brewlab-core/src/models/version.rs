//! Recipe version model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::RecipeStep;

/// A versioned brew specification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeVersion {
    pub id: String,

    /// ID of the owning recipe
    pub recipe_id: String,

    /// Monotonically increasing per recipe, starting at 1
    pub version_number: u32,

    /// Total water for one brew, grams
    pub base_water_grams: f64,

    /// Ground coffee for one brew, grams
    pub base_dose_grams: f64,

    /// Target water temperature, degrees Celsius
    pub target_temp_c: f64,

    pub grind_label: String,

    #[serde(default)]
    pub notes: String,

    /// Ordered equipment names
    #[serde(default)]
    pub equipment: Vec<String>,

    /// Ordered steps; at least one for a valid version
    pub steps: Vec<RecipeStep>,

    pub created_at: Timestamp,
}

impl RecipeVersion {
    /// Water to dose ratio of the base specification.
    pub fn ratio(&self) -> f64 {
        if self.base_dose_grams <= 0.0 {
            return 0.0;
        }
        self.base_water_grams / self.base_dose_grams
    }
}
