//! Recipe operations for the Library.

use jiff::Timestamp;
use log::{debug, info};

use super::{short_id, Library, RECIPE_ID_LEN};
use crate::{
    brew::{BrewPlan, ScaleOptions},
    display::RecipeSummaries,
    error::{BrewError, Result},
    legacy::blank_recipe,
    models::{Recipe, RecipeStep, RecipeSummary, RecipeVersion},
    params::{ListRecipes, PlanBrew, RecipeId, RecipeSlug, ScaleRecipe},
};

impl Library {
    /// Lists every public recipe, most recently updated first.
    pub async fn list_public_recipes(&self) -> Result<Vec<Recipe>> {
        self.with_db(|db| db.list_public_recipes()).await
    }

    /// Lists the recipes owned by `owner_id`, public or not.
    pub async fn list_recipes_by_owner(&self, owner_id: &str) -> Result<Vec<Recipe>> {
        let owner_id = owner_id.to_string();
        self.with_db(move |db| db.list_recipes_by_owner(&owner_id))
            .await
    }

    /// Handle listing recipes as summaries: public recipes by default, or
    /// the caller's own when `mine` is set.
    pub async fn list_recipes_summary(
        &self,
        params: &ListRecipes,
        owner_id: &str,
    ) -> Result<RecipeSummaries> {
        let recipes = if params.mine {
            self.list_recipes_by_owner(owner_id).await?
        } else {
            self.list_public_recipes().await?
        };
        Ok(RecipeSummaries(
            recipes.iter().map(RecipeSummary::from).collect(),
        ))
    }

    pub async fn get_recipe_by_slug(&self, params: &RecipeSlug) -> Result<Option<Recipe>> {
        let slug = params.slug.clone();
        self.with_db(move |db| db.get_recipe_by_slug(&slug)).await
    }

    pub async fn get_recipe_by_id(&self, params: &RecipeId) -> Result<Option<Recipe>> {
        let recipe_id = params.recipe_id.clone();
        self.with_db(move |db| db.get_recipe_by_id(&recipe_id)).await
    }

    /// Like [`Library::get_recipe_by_slug`], but a missing recipe is an error.
    pub async fn require_recipe_by_slug(&self, params: &RecipeSlug) -> Result<Recipe> {
        self.get_recipe_by_slug(params)
            .await?
            .ok_or_else(|| BrewError::RecipeNotFound {
                key: params.slug.clone(),
            })
    }

    /// Saves a draft on behalf of `owner_id`.
    ///
    /// The recipe is normalized first: steps and versions are sorted, parent
    /// ids are rewritten, the owner is stamped, difficulty and brew time are
    /// recomputed and `updated_at` is set to now. An existing recipe with the
    /// same id must already belong to `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `BrewError::PermissionDenied` if the stored recipe has another owner
    /// Returns `BrewError::InvalidInput` if the normalized recipe fails validation
    pub async fn save_recipe_draft(&self, recipe: Recipe, owner_id: &str) -> Result<Recipe> {
        let owner_id = owner_id.to_string();
        self.with_db(move |db| {
            if let Some(existing) = db.get_recipe_by_id(&recipe.id)? {
                if !existing.is_owned_by(&owner_id) {
                    return Err(BrewError::PermissionDenied {
                        recipe_id: recipe.id,
                        owner_id,
                    });
                }
            }

            let recipe = normalize_draft(recipe, &owner_id, Timestamp::now());
            recipe.validate()?;
            db.save_recipe(&recipe)?;
            debug!("Saved draft '{}' for '{}'", recipe.slug, owner_id);
            Ok(recipe)
        })
        .await
    }

    /// Creates and stores a private template draft for `owner_id`.
    pub async fn create_draft_recipe(&self, owner_id: &str) -> Result<Recipe> {
        let draft = blank_recipe(&short_id(RECIPE_ID_LEN), owner_id, Timestamp::now());
        let saved = self.save_recipe_draft(draft, owner_id).await?;
        info!("Created draft recipe '{}'", saved.slug);
        Ok(saved)
    }

    /// Marks an owned recipe public and saves it.
    ///
    /// # Errors
    ///
    /// Returns `BrewError::PermissionDenied` if `owner_id` does not own the recipe
    pub async fn publish_recipe(&self, recipe: Recipe, owner_id: &str) -> Result<Recipe> {
        if !recipe.is_owned_by(owner_id) {
            return Err(BrewError::PermissionDenied {
                recipe_id: recipe.id,
                owner_id: owner_id.to_string(),
            });
        }
        let published = self
            .save_recipe_draft(
                Recipe {
                    is_public: true,
                    ..recipe
                },
                owner_id,
            )
            .await?;
        info!("Published recipe '{}'", published.slug);
        Ok(published)
    }

    /// Handle publishing a recipe by slug.
    pub async fn publish_recipe_by_slug(
        &self,
        params: &RecipeSlug,
        owner_id: &str,
    ) -> Result<Recipe> {
        let recipe = self.require_recipe_by_slug(params).await?;
        self.publish_recipe(recipe, owner_id).await
    }

    /// Copies the active version of `source` into a new private recipe owned
    /// by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `BrewError::PermissionDenied` if `source` is private and owned by someone else
    pub async fn remix_recipe(&self, source: &Recipe, owner_id: &str) -> Result<Recipe> {
        if !source.is_public && !source.is_owned_by(owner_id) {
            return Err(BrewError::PermissionDenied {
                recipe_id: source.id.clone(),
                owner_id: owner_id.to_string(),
            });
        }
        let remix = build_remix(source, &short_id(RECIPE_ID_LEN), owner_id, Timestamp::now())?;
        let saved = self.save_recipe_draft(remix, owner_id).await?;
        info!("Remixed '{}' into '{}'", source.slug, saved.slug);
        Ok(saved)
    }

    /// Handle remixing a recipe by slug.
    pub async fn remix_recipe_by_slug(
        &self,
        params: &RecipeSlug,
        owner_id: &str,
    ) -> Result<Recipe> {
        let source = self.require_recipe_by_slug(params).await?;
        self.remix_recipe(&source, owner_id).await
    }

    /// Handle scaling a recipe's active version. Missing targets fall back to
    /// the version's own water mass and ratio.
    pub async fn scale_recipe(&self, params: &ScaleRecipe) -> Result<BrewPlan> {
        let recipe = self
            .require_recipe_by_slug(&RecipeSlug {
                slug: params.slug.clone(),
            })
            .await?;
        let options = recipe.active_version().map(|version| {
            let base = ScaleOptions::for_version(version);
            ScaleOptions {
                target_water_grams: params.target_water_grams.unwrap_or(base.target_water_grams),
                target_ratio: params.target_ratio.unwrap_or(base.target_ratio),
            }
        });
        BrewPlan::prepare(&recipe, options)
    }

    /// Handle planning a brew: the scaled plan with its prep checklist and
    /// step schedule.
    pub async fn plan_brew(&self, params: &PlanBrew) -> Result<BrewPlan> {
        self.scale_recipe(&ScaleRecipe::from(params)).await
    }
}

/// Brings a draft into its persisted shape for `owner_id`.
pub(crate) fn normalize_draft(mut recipe: Recipe, owner_id: &str, now: Timestamp) -> Recipe {
    recipe.owner_id = Some(owner_id.to_string());
    recipe
        .versions
        .sort_by(|a, b| b.version_number.cmp(&a.version_number));
    for version in &mut recipe.versions {
        version.recipe_id = recipe.id.clone();
        version.steps.sort_by_key(|step| step.step_order);
        for step in &mut version.steps {
            step.version_id = version.id.clone();
        }
    }
    if !recipe
        .versions
        .iter()
        .any(|version| version.id == recipe.active_version_id)
    {
        if let Some(latest) = recipe.versions.first() {
            recipe.active_version_id = latest.id.clone();
        }
    }
    recipe.refresh_derived();
    recipe.updated_at = now;
    recipe
}

/// Builds the unsaved remix of `source`: a single fresh version whose steps
/// are renumbered from zero.
pub(crate) fn build_remix(
    source: &Recipe,
    recipe_id: &str,
    owner_id: &str,
    now: Timestamp,
) -> Result<Recipe> {
    let active = source.active_version().ok_or_else(|| {
        BrewError::invalid_input("versions")
            .with_reason(format!("recipe '{}' has no version to remix", source.slug))
    })?;

    let version_id = format!("{recipe_id}-v1");
    let steps = active
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| RecipeStep {
            id: format!("{recipe_id}-step-{}", index + 1),
            version_id: version_id.clone(),
            step_order: index as u32,
            ..step.clone()
        })
        .collect();
    let stem: String = recipe_id.chars().take(4).collect();

    Ok(Recipe {
        id: recipe_id.to_string(),
        owner_id: Some(owner_id.to_string()),
        slug: format!("{}-remix-{stem}", source.slug),
        title: format!("{} Remix", source.title),
        is_public: false,
        active_version_id: version_id.clone(),
        versions: vec![RecipeVersion {
            id: version_id,
            recipe_id: recipe_id.to_string(),
            version_number: 1,
            steps,
            created_at: now,
            ..active.clone()
        }],
        created_at: now,
        updated_at: now,
        ..source.clone()
    })
}
