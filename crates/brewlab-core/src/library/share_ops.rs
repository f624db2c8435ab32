//! Share link operations for the Library.

use jiff::Timestamp;
use log::{debug, info};

use super::{short_id, Library, RECIPE_ID_LEN, SHARE_TOKEN_LEN};
use crate::{
    db::Database,
    display::ShareLinks,
    error::{BrewError, Result},
    models::{Recipe, ShareLink},
    params::{RecipeSlug, ShareToken},
};

/// Tokens with this prefix resolve straight to the seed recipe of that slug.
pub const SEED_TOKEN_PREFIX: &str = "seed-";

impl Library {
    /// Returns the caller's newest active link for the recipe, creating one
    /// pointing at the active version when none exists.
    ///
    /// # Errors
    ///
    /// Returns `BrewError::RecipeNotFound` if no recipe has the slug
    /// Returns `BrewError::PermissionDenied` if the recipe is private and owned by someone else
    pub async fn create_or_get_share_link(
        &self,
        params: &RecipeSlug,
        owner_id: &str,
    ) -> Result<ShareLink> {
        let slug = params.slug.clone();
        let owner_id = owner_id.to_string();
        self.with_db(move |db| {
            let recipe = db
                .get_recipe_by_slug(&slug)?
                .ok_or(BrewError::RecipeNotFound { key: slug })?;
            if !recipe.is_public && !recipe.is_owned_by(&owner_id) {
                return Err(BrewError::PermissionDenied {
                    recipe_id: recipe.id,
                    owner_id,
                });
            }

            if let Some(existing) = db.find_active_share_link(&recipe.id, &owner_id)? {
                debug!("Reusing share link for '{}'", recipe.slug);
                return Ok(existing);
            }

            let link = ShareLink {
                id: short_id(RECIPE_ID_LEN),
                recipe_id: recipe.id.clone(),
                token: short_id(SHARE_TOKEN_LEN),
                published_version_id: recipe.active_version_id.clone(),
                created_by: owner_id,
                revoked_at: None,
                created_at: Timestamp::now(),
            };
            db.insert_share_link(&link)?;
            info!("Created share link for '{}'", recipe.slug);
            Ok(link)
        })
        .await
    }

    /// The caller's links for a recipe, revoked ones included, newest first.
    pub async fn list_share_links(
        &self,
        params: &RecipeSlug,
        owner_id: &str,
    ) -> Result<ShareLinks> {
        let slug = params.slug.clone();
        let owner_id = owner_id.to_string();
        self.with_db(move |db| {
            let recipe = db
                .get_recipe_by_slug(&slug)?
                .ok_or(BrewError::RecipeNotFound { key: slug })?;
            let links = db
                .list_share_links(&recipe.id)?
                .into_iter()
                .filter(|link| link.created_by == owner_id)
                .collect();
            Ok(ShareLinks(links))
        })
        .await
    }

    /// Revokes one of the caller's links.
    ///
    /// # Errors
    ///
    /// Returns `BrewError::ShareLinkNotFound` if the caller has no active link with the token
    pub async fn revoke_share_link(&self, params: &ShareToken, owner_id: &str) -> Result<()> {
        let token = params.token.clone();
        let owner_id = owner_id.to_string();
        self.with_db(move |db| {
            if db.revoke_share_link(&token, &owner_id, Timestamp::now())? {
                info!("Revoked share link '{token}'");
                Ok(())
            } else {
                Err(BrewError::ShareLinkNotFound { token })
            }
        })
        .await
    }

    /// Resolves a token to the shared recipe, with its active version set to
    /// the one the link published when that version still exists. Revoked
    /// and unknown tokens resolve to `None`.
    pub async fn get_recipe_by_share_token(&self, params: &ShareToken) -> Result<Option<Recipe>> {
        let token = params.token.clone();
        self.with_db(move |db| resolve_share_token(db, &token)).await
    }

    /// Remixes whatever a share token resolves to into a private copy.
    ///
    /// # Errors
    ///
    /// Returns `BrewError::ShareLinkNotFound` if the token does not resolve
    pub async fn remix_recipe_from_share_token(
        &self,
        params: &ShareToken,
        owner_id: &str,
    ) -> Result<Recipe> {
        let source = self
            .get_recipe_by_share_token(params)
            .await?
            .ok_or_else(|| BrewError::ShareLinkNotFound {
                token: params.token.clone(),
            })?;
        // Holding the token grants read access even to a private recipe.
        let source = Recipe {
            is_public: true,
            ..source
        };
        self.remix_recipe(&source, owner_id).await
    }
}

fn resolve_share_token(db: &Database, token: &str) -> Result<Option<Recipe>> {
    if token.starts_with(SEED_TOKEN_PREFIX) {
        let seed = db
            .get_recipe_by_id(token)?
            .filter(|recipe| recipe.owner_id.is_none());
        return Ok(seed);
    }

    let Some(link) = db
        .get_share_link_by_token(token)?
        .filter(ShareLink::is_active)
    else {
        return Ok(None);
    };

    let recipe = db.get_recipe_by_id(&link.recipe_id)?.map(|mut recipe| {
        if recipe
            .versions
            .iter()
            .any(|version| version.id == link.published_version_id)
        {
            recipe.active_version_id = link.published_version_id.clone();
        }
        recipe
    });
    Ok(recipe)
}
