//! Share link persistence.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::rows::{optional_timestamp_at, timestamp_at};
use crate::{
    error::{DatabaseResultExt, Result},
    models::ShareLink,
};

const INSERT_SHARE_LINK_SQL: &str = "INSERT INTO share_links (id, recipe_id, token, published_version_id, created_by, revoked_at, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_ACTIVE_LINK_SQL: &str = "SELECT id, recipe_id, token, published_version_id, created_by, revoked_at, created_at FROM share_links WHERE recipe_id = ?1 AND created_by = ?2 AND revoked_at IS NULL ORDER BY created_at DESC LIMIT 1";
const SELECT_LINK_BY_TOKEN_SQL: &str = "SELECT id, recipe_id, token, published_version_id, created_by, revoked_at, created_at FROM share_links WHERE token = ?1";
const SELECT_LINKS_BY_RECIPE_SQL: &str = "SELECT id, recipe_id, token, published_version_id, created_by, revoked_at, created_at FROM share_links WHERE recipe_id = ?1 ORDER BY created_at DESC";
const REVOKE_LINK_SQL: &str = "UPDATE share_links SET revoked_at = ?1 WHERE token = ?2 AND created_by = ?3 AND revoked_at IS NULL";

impl super::Database {
    fn build_share_link_from_row(row: &rusqlite::Row) -> rusqlite::Result<ShareLink> {
        Ok(ShareLink {
            id: row.get(0)?,
            recipe_id: row.get(1)?,
            token: row.get(2)?,
            published_version_id: row.get(3)?,
            created_by: row.get(4)?,
            revoked_at: optional_timestamp_at(row, 5)?,
            created_at: timestamp_at(row, 6)?,
        })
    }

    pub fn insert_share_link(&self, link: &ShareLink) -> Result<()> {
        self.connection
            .execute(
                INSERT_SHARE_LINK_SQL,
                params![
                    link.id,
                    link.recipe_id,
                    link.token,
                    link.published_version_id,
                    link.created_by,
                    link.revoked_at.map(|at| at.to_string()),
                    link.created_at.to_string(),
                ],
            )
            .db_context("Failed to insert share link")?;
        Ok(())
    }

    /// The newest un-revoked link `created_by` made for a recipe.
    pub fn find_active_share_link(
        &self,
        recipe_id: &str,
        created_by: &str,
    ) -> Result<Option<ShareLink>> {
        self.connection
            .query_row(
                SELECT_ACTIVE_LINK_SQL,
                params![recipe_id, created_by],
                Self::build_share_link_from_row,
            )
            .optional()
            .db_context("Failed to query share link")
    }

    /// Looks a token up regardless of revocation.
    pub fn get_share_link_by_token(&self, token: &str) -> Result<Option<ShareLink>> {
        self.connection
            .query_row(
                SELECT_LINK_BY_TOKEN_SQL,
                params![token],
                Self::build_share_link_from_row,
            )
            .optional()
            .db_context("Failed to query share link")
    }

    pub fn list_share_links(&self, recipe_id: &str) -> Result<Vec<ShareLink>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_LINKS_BY_RECIPE_SQL)
            .db_context("Failed to prepare query")?;
        let links = stmt
            .query_map(params![recipe_id], Self::build_share_link_from_row)
            .db_context("Failed to query share links")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to collect share links")?;
        Ok(links)
    }

    /// Marks an active link revoked. Returns whether one was revoked.
    pub fn revoke_share_link(
        &self,
        token: &str,
        created_by: &str,
        revoked_at: Timestamp,
    ) -> Result<bool> {
        let changed = self
            .connection
            .execute(
                REVOKE_LINK_SQL,
                params![revoked_at.to_string(), token, created_by],
            )
            .db_context("Failed to revoke share link")?;
        Ok(changed > 0)
    }
}
