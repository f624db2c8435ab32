//! Database schema initialization, migrations and seeding.

use log::{debug, info};

use crate::{
    error::{DatabaseResultExt, Result},
    legacy,
};

const HAS_COLUMN_SQL: &str = "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2";

/// Columns added after the first schema release, with their DDL.
const ADDITIVE_COLUMNS: &[(&str, &str, &str)] = &[
    ("recipe_steps", "tips", "ALTER TABLE recipe_steps ADD COLUMN tips TEXT"),
    (
        "recipe_versions",
        "notes",
        "ALTER TABLE recipe_versions ADD COLUMN notes TEXT NOT NULL DEFAULT ''",
    ),
];

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&mut self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;
        self.seed_legacy_recipes()?;

        Ok(())
    }

    /// Adds columns missing from databases created by older releases.
    fn apply_migrations(&self) -> Result<()> {
        for (table, column, ddl) in ADDITIVE_COLUMNS {
            let present: bool = self
                .connection
                .query_row(HAS_COLUMN_SQL, [table, column], |row| row.get::<_, i64>(0))
                .map(|count| count > 0)
                .unwrap_or(false);

            if !present {
                info!("Migrating {table}: adding column {column}");
                self.connection
                    .execute(ddl, [])
                    .db_context("Failed to apply schema migration")?;
            }
        }
        Ok(())
    }

    /// Inserts the legacy seed recipes that are not already present.
    fn seed_legacy_recipes(&mut self) -> Result<()> {
        let mut inserted = 0;
        for recipe in legacy::seed_recipes()? {
            if self.insert_recipe_if_absent(&recipe)? {
                inserted += 1;
            }
        }
        if inserted > 0 {
            info!("Seeded {inserted} legacy recipes");
        } else {
            debug!("Legacy recipes already seeded");
        }
        Ok(())
    }
}
