//! Data models for recipes, versions, steps and share links.
//!
//! These mirror the records held by the repository layer. Display
//! implementations live in [`crate::display::models`]; the derived,
//! never-persisted brewing views (planned steps, session state) live in
//! [`crate::brew`].
//!
//! Every optional attribute is an [`Option`] and serializes as JSON `null`
//! when absent. JSON field names are camelCase so snapshots and legacy
//! payloads keep their established shape.
//!
//! # Examples
//!
//! ```rust
//! use brewlab_core::models::{RecipeStep, StepType};
//!
//! let step = RecipeStep {
//!     id: "v60-step-2".to_string(),
//!     version_id: "v60-v1".to_string(),
//!     step_order: 1,
//!     step_type: StepType::Pour,
//!     instruction: "Bloom with 60g of water".to_string(),
//!     target_water_grams: Some(60.0),
//!     duration_sec: Some(45),
//!     window_start_sec: None,
//!     window_end_sec: None,
//!     tips: None,
//! };
//! assert_eq!(step.pour_target(), Some(60.0));
//! ```

pub mod kind;
pub mod recipe;
pub mod share;
pub mod step;
pub mod summary;
pub mod validation;
pub mod version;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
mod tests;

pub use kind::{Difficulty, StepType};
pub use recipe::{estimate_brew_time_min, Recipe};
pub use share::ShareLink;
pub use step::RecipeStep;
pub use summary::RecipeSummary;
pub use version::RecipeVersion;
