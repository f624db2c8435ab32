//! Recipe model definition and derived attributes.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Difficulty, RecipeStep, RecipeVersion};

/// Seconds assumed for a step without a duration when estimating brew time.
const ESTIMATE_STEP_SEC: u32 = 25;

/// The top-level shareable entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,

    /// Owner of the recipe; `None` marks an unclaimed seed recipe
    pub owner_id: Option<String>,

    /// Unique URL slug
    pub slug: String,

    pub title: String,

    /// Brewer or method name
    pub brewer: String,

    pub description: String,

    pub quote: String,

    pub cover_image_url: String,

    /// Whether the recipe is listed publicly
    pub is_public: bool,

    pub difficulty: Difficulty,

    /// Estimated total brew time in minutes
    pub brew_time_min: u32,

    /// Version used for brewing and sharing
    pub active_version_id: String,

    /// Versions, newest first
    pub versions: Vec<RecipeVersion>,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl Recipe {
    /// Returns the active version, falling back to the first version when
    /// the active id does not resolve.
    pub fn active_version(&self) -> Option<&RecipeVersion> {
        self.versions
            .iter()
            .find(|version| version.id == self.active_version_id)
            .or_else(|| self.versions.first())
    }

    /// Recomputes difficulty and brew-time estimate from the active version.
    pub fn refresh_derived(&mut self) {
        if let Some(version) = self.active_version() {
            let difficulty = Difficulty::from_step_count(version.steps.len());
            let brew_time_min = estimate_brew_time_min(&version.steps);
            self.difficulty = difficulty;
            self.brew_time_min = brew_time_min;
        }
    }

    /// Whether the given owner may modify this recipe.
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id.as_deref() == Some(owner_id)
    }
}

/// Whole-minute brew-time estimate, never below two minutes.
pub fn estimate_brew_time_min(steps: &[RecipeStep]) -> u32 {
    let total_sec: u32 = steps
        .iter()
        .map(|step| step.duration_sec.unwrap_or(ESTIMATE_STEP_SEC))
        .sum();
    let minutes = (f64::from(total_sec) / 60.0).round() as u32;
    minutes.max(2)
}
