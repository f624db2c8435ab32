//! Session snapshot blobs keyed by recipe id.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const UPSERT_SNAPSHOT_SQL: &str = "INSERT INTO session_snapshots (recipe_id, payload, stored_at) VALUES (?1, ?2, ?3) ON CONFLICT(recipe_id) DO UPDATE SET payload = excluded.payload, stored_at = excluded.stored_at";
const SELECT_SNAPSHOT_SQL: &str = "SELECT payload FROM session_snapshots WHERE recipe_id = ?1";
const DELETE_SNAPSHOT_SQL: &str = "DELETE FROM session_snapshots WHERE recipe_id = ?1";

impl super::Database {
    /// Stores the opaque payload, replacing any earlier one for the recipe.
    pub fn put_snapshot(&self, recipe_id: &str, payload: &str, stored_at: Timestamp) -> Result<()> {
        self.connection
            .execute(
                UPSERT_SNAPSHOT_SQL,
                params![recipe_id, payload, stored_at.to_string()],
            )
            .db_context("Failed to store session snapshot")?;
        Ok(())
    }

    pub fn get_snapshot(&self, recipe_id: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_SNAPSHOT_SQL, params![recipe_id], |row| row.get(0))
            .optional()
            .db_context("Failed to load session snapshot")
    }

    pub fn delete_snapshot(&self, recipe_id: &str) -> Result<bool> {
        let changed = self
            .connection
            .execute(DELETE_SNAPSHOT_SQL, params![recipe_id])
            .db_context("Failed to delete session snapshot")?;
        Ok(changed > 0)
    }
}
