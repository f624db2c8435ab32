//! Parameter structures shared by the CLI and MCP interfaces.
//!
//! Core parameters carry no framework derives beyond serde. Interface layers
//! wrap them: the CLI converts its clap args with `From`, the MCP server
//! deserializes them through a transparent wrapper that adds a JSON schema
//! when the `schema` feature is on.
//!
//! The acting owner is never part of a parameter struct. It is chosen once
//! by whoever constructs the interface and passed alongside.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::brew::PromptStyle;

/// Selects a recipe by slug.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RecipeSlug {
    /// URL slug of the recipe, e.g. "hario-v60"
    pub slug: String,
}

/// Selects a recipe by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RecipeId {
    /// Recipe id, e.g. "seed-hario-v60"
    pub recipe_id: String,
}

/// Parameters for listing recipes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListRecipes {
    /// List the acting owner's recipes instead of the public library
    #[serde(default)]
    pub mine: bool,
}

/// Parameters for rescaling a recipe.
///
/// Missing targets fall back to the active version's own water mass and
/// ratio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ScaleRecipe {
    /// URL slug of the recipe
    pub slug: String,
    /// Total water in grams
    #[serde(default)]
    pub target_water_grams: Option<f64>,
    /// Water to coffee ratio, e.g. 16 for 1:16
    #[serde(default)]
    pub target_ratio: Option<f64>,
}

/// Parameters for planning a brew session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanBrew {
    /// URL slug of the recipe
    pub slug: String,
    /// Total water in grams
    #[serde(default)]
    pub target_water_grams: Option<f64>,
    /// Water to coffee ratio, e.g. 16 for 1:16
    #[serde(default)]
    pub target_ratio: Option<f64>,
    /// Directive voice: "barista" (default) or "plain"
    #[serde(default)]
    pub prompt_style: PromptStyle,
}

impl From<&PlanBrew> for ScaleRecipe {
    fn from(params: &PlanBrew) -> Self {
        Self {
            slug: params.slug.clone(),
            target_water_grams: params.target_water_grams,
            target_ratio: params.target_ratio,
        }
    }
}

/// Selects a share link by token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ShareToken {
    /// Share token, or "seed-{slug}" for a seed recipe
    pub token: String,
}
