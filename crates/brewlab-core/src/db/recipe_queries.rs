//! Recipe, version and step persistence.

use rusqlite::{params, Connection, OptionalExtension};

use super::rows::{json_at, parsed_at, timestamp_at};
use crate::{
    error::{BrewError, DatabaseResultExt, Result},
    models::{Recipe, RecipeStep, RecipeVersion},
};

const RECIPE_COLUMNS: &str = "id, owner_id, slug, title, brewer, description, quote, cover_image_url, is_public, difficulty, brew_time_min, active_version_id, created_at, updated_at";
const UPSERT_RECIPE_SQL: &str = "INSERT INTO recipes (id, owner_id, slug, title, brewer, description, quote, cover_image_url, is_public, difficulty, brew_time_min, active_version_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14) ON CONFLICT(id) DO UPDATE SET owner_id = excluded.owner_id, slug = excluded.slug, title = excluded.title, brewer = excluded.brewer, description = excluded.description, quote = excluded.quote, cover_image_url = excluded.cover_image_url, is_public = excluded.is_public, difficulty = excluded.difficulty, brew_time_min = excluded.brew_time_min, active_version_id = excluded.active_version_id, updated_at = excluded.updated_at";
const INSERT_RECIPE_IF_ABSENT_SQL: &str = "INSERT OR IGNORE INTO recipes (id, owner_id, slug, title, brewer, description, quote, cover_image_url, is_public, difficulty, brew_time_min, active_version_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";
const DELETE_RECIPE_VERSIONS_SQL: &str = "DELETE FROM recipe_versions WHERE recipe_id = ?1";
const INSERT_VERSION_SQL: &str = "INSERT INTO recipe_versions (id, recipe_id, version_number, base_water_grams, base_dose_grams, target_temp_c, grind_label, notes, equipment, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const INSERT_STEP_SQL: &str = "INSERT INTO recipe_steps (id, version_id, step_order, step_type, instruction, target_water_grams, duration_sec, window_start_sec, window_end_sec, tips) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const SLUG_TAKEN_SQL: &str = "SELECT EXISTS(SELECT 1 FROM recipes WHERE slug = ?1 AND id != ?2)";
const SELECT_VERSIONS_SQL: &str = "SELECT id, recipe_id, version_number, base_water_grams, base_dose_grams, target_temp_c, grind_label, notes, equipment, created_at FROM recipe_versions WHERE recipe_id = ?1 ORDER BY version_number DESC";
const SELECT_STEPS_SQL: &str = "SELECT id, version_id, step_order, step_type, instruction, target_water_grams, duration_sec, window_start_sec, window_end_sec, tips FROM recipe_steps WHERE version_id = ?1 ORDER BY step_order";
const UPDATE_RECIPE_VISIBILITY_SQL: &str =
    "UPDATE recipes SET is_public = ?1, updated_at = ?2 WHERE id = ?3";

impl super::Database {
    fn build_recipe_from_row(row: &rusqlite::Row) -> rusqlite::Result<Recipe> {
        Ok(Recipe {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            slug: row.get(2)?,
            title: row.get(3)?,
            brewer: row.get(4)?,
            description: row.get(5)?,
            quote: row.get(6)?,
            cover_image_url: row.get(7)?,
            is_public: row.get(8)?,
            difficulty: parsed_at(row, 9)?,
            brew_time_min: row.get(10)?,
            active_version_id: row.get(11)?,
            versions: Vec::new(),
            created_at: timestamp_at(row, 12)?,
            updated_at: timestamp_at(row, 13)?,
        })
    }

    fn build_version_from_row(row: &rusqlite::Row) -> rusqlite::Result<RecipeVersion> {
        Ok(RecipeVersion {
            id: row.get(0)?,
            recipe_id: row.get(1)?,
            version_number: row.get(2)?,
            base_water_grams: row.get(3)?,
            base_dose_grams: row.get(4)?,
            target_temp_c: row.get(5)?,
            grind_label: row.get(6)?,
            notes: row.get(7)?,
            equipment: json_at(row, 8)?,
            steps: Vec::new(),
            created_at: timestamp_at(row, 9)?,
        })
    }

    fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<RecipeStep> {
        Ok(RecipeStep {
            id: row.get(0)?,
            version_id: row.get(1)?,
            step_order: row.get(2)?,
            step_type: parsed_at(row, 3)?,
            instruction: row.get(4)?,
            target_water_grams: row.get(5)?,
            duration_sec: row.get(6)?,
            window_start_sec: row.get(7)?,
            window_end_sec: row.get(8)?,
            tips: row.get(9)?,
        })
    }

    /// Writes a recipe with every version and step in one transaction. The
    /// stored versions are replaced wholesale; the last write wins.
    pub fn save_recipe(&mut self, recipe: &Recipe) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let slug_taken: bool = tx
            .query_row(SLUG_TAKEN_SQL, params![recipe.slug, recipe.id], |row| row.get(0))
            .db_context("Failed to check slug availability")?;
        if slug_taken {
            return Err(BrewError::invalid_input("slug")
                .with_reason(format!("'{}' is already used by another recipe", recipe.slug)));
        }

        tx.execute(UPSERT_RECIPE_SQL, Self::recipe_row(recipe).as_params())
            .db_context("Failed to upsert recipe")?;
        tx.execute(DELETE_RECIPE_VERSIONS_SQL, params![recipe.id])
            .db_context("Failed to clear recipe versions")?;
        Self::insert_versions(&tx, recipe)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Inserts a recipe unless one with the same id or slug exists. Returns
    /// whether it was inserted.
    pub fn insert_recipe_if_absent(&mut self, recipe: &Recipe) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let inserted = tx
            .execute(INSERT_RECIPE_IF_ABSENT_SQL, Self::recipe_row(recipe).as_params())
            .db_context("Failed to insert recipe")?;
        if inserted == 0 {
            return Ok(false);
        }
        Self::insert_versions(&tx, recipe)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(true)
    }

    fn recipe_row(recipe: &Recipe) -> RecipeRow {
        RecipeRow {
            id: recipe.id.clone(),
            owner_id: recipe.owner_id.clone(),
            slug: recipe.slug.clone(),
            title: recipe.title.clone(),
            brewer: recipe.brewer.clone(),
            description: recipe.description.clone(),
            quote: recipe.quote.clone(),
            cover_image_url: recipe.cover_image_url.clone(),
            is_public: recipe.is_public,
            difficulty: recipe.difficulty.as_str(),
            brew_time_min: recipe.brew_time_min,
            active_version_id: recipe.active_version_id.clone(),
            created_at: recipe.created_at.to_string(),
            updated_at: recipe.updated_at.to_string(),
        }
    }

    fn insert_versions(connection: &Connection, recipe: &Recipe) -> Result<()> {
        let mut version_stmt = connection
            .prepare(INSERT_VERSION_SQL)
            .db_context("Failed to prepare version insert")?;
        let mut step_stmt = connection
            .prepare(INSERT_STEP_SQL)
            .db_context("Failed to prepare step insert")?;

        for version in &recipe.versions {
            let equipment = serde_json::to_string(&version.equipment)?;
            version_stmt
                .execute(params![
                    version.id,
                    recipe.id,
                    version.version_number,
                    version.base_water_grams,
                    version.base_dose_grams,
                    version.target_temp_c,
                    version.grind_label,
                    version.notes,
                    equipment,
                    version.created_at.to_string(),
                ])
                .db_context("Failed to insert recipe version")?;

            for step in &version.steps {
                step_stmt
                    .execute(params![
                        step.id,
                        version.id,
                        step.step_order,
                        step.step_type.as_str(),
                        step.instruction,
                        step.target_water_grams,
                        step.duration_sec,
                        step.window_start_sec,
                        step.window_end_sec,
                        step.tips,
                    ])
                    .db_context("Failed to insert recipe step")?;
            }
        }
        Ok(())
    }

    pub fn get_recipe_by_id(&self, id: &str) -> Result<Option<Recipe>> {
        self.query_single_recipe("id", id)
    }

    pub fn get_recipe_by_slug(&self, slug: &str) -> Result<Option<Recipe>> {
        self.query_single_recipe("slug", slug)
    }

    fn query_single_recipe(&self, column: &str, key: &str) -> Result<Option<Recipe>> {
        let query = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE {column} = ?1");
        let recipe = self
            .connection
            .query_row(&query, params![key], Self::build_recipe_from_row)
            .optional()
            .db_context("Failed to query recipe")?;

        recipe.map(|recipe| self.with_versions(recipe)).transpose()
    }

    /// Public recipes, seeds included, most recently updated first.
    pub fn list_public_recipes(&self) -> Result<Vec<Recipe>> {
        let query = format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE is_public = 1 ORDER BY updated_at DESC, slug"
        );
        self.query_recipes(&query, params![])
    }

    pub fn list_recipes_by_owner(&self, owner_id: &str) -> Result<Vec<Recipe>> {
        let query = format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE owner_id = ?1 ORDER BY updated_at DESC, slug"
        );
        self.query_recipes(&query, params![owner_id])
    }

    fn query_recipes(&self, query: &str, params: impl rusqlite::Params) -> Result<Vec<Recipe>> {
        let mut stmt = self
            .connection
            .prepare(query)
            .db_context("Failed to prepare query")?;

        let recipes = stmt
            .query_map(params, Self::build_recipe_from_row)
            .db_context("Failed to query recipes")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to collect recipes")?;

        recipes
            .into_iter()
            .map(|recipe| self.with_versions(recipe))
            .collect()
    }

    /// Eagerly loads versions and their steps.
    fn with_versions(&self, mut recipe: Recipe) -> Result<Recipe> {
        let mut version_stmt = self
            .connection
            .prepare(SELECT_VERSIONS_SQL)
            .db_context("Failed to prepare version query")?;
        let mut versions = version_stmt
            .query_map(params![recipe.id], Self::build_version_from_row)
            .db_context("Failed to query versions")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to collect versions")?;

        let mut step_stmt = self
            .connection
            .prepare(SELECT_STEPS_SQL)
            .db_context("Failed to prepare step query")?;
        for version in &mut versions {
            version.steps = step_stmt
                .query_map(params![version.id], Self::build_step_from_row)
                .db_context("Failed to query steps")?
                .collect::<rusqlite::Result<Vec<_>>>()
                .db_context("Failed to collect steps")?;
        }

        recipe.versions = versions;
        Ok(recipe)
    }

    /// Sets the public flag. Returns whether a recipe was updated.
    pub fn set_recipe_visibility(
        &self,
        id: &str,
        is_public: bool,
        updated_at: jiff::Timestamp,
    ) -> Result<bool> {
        let changed = self
            .connection
            .execute(
                UPDATE_RECIPE_VISIBILITY_SQL,
                params![is_public, updated_at.to_string(), id],
            )
            .db_context("Failed to update recipe visibility")?;
        Ok(changed > 0)
    }
}

/// Owned column values for the recipes table.
struct RecipeRow {
    id: String,
    owner_id: Option<String>,
    slug: String,
    title: String,
    brewer: String,
    description: String,
    quote: String,
    cover_image_url: String,
    is_public: bool,
    difficulty: &'static str,
    brew_time_min: u32,
    active_version_id: String,
    created_at: String,
    updated_at: String,
}

impl RecipeRow {
    fn as_params(&self) -> [&dyn rusqlite::ToSql; 14] {
        [
            &self.id,
            &self.owner_id,
            &self.slug,
            &self.title,
            &self.brewer,
            &self.description,
            &self.quote,
            &self.cover_image_url,
            &self.is_public,
            &self.difficulty,
            &self.brew_time_min,
            &self.active_version_id,
            &self.created_at,
            &self.updated_at,
        ]
    }
}
