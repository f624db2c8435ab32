//! Session snapshot persistence for the Library.

use jiff::Timestamp;
use log::{debug, warn};

use super::Library;
use crate::{brew::SessionSnapshot, error::Result, params::RecipeId};

impl Library {
    /// Stores the snapshot as the recipe's resumable session.
    pub async fn save_session_snapshot(
        &self,
        params: &RecipeId,
        snapshot: &SessionSnapshot,
    ) -> Result<()> {
        let recipe_id = params.recipe_id.clone();
        let payload = snapshot.to_blob()?;
        let stored_at = snapshot.stored_at;
        self.with_db(move |db| db.put_snapshot(&recipe_id, &payload, stored_at))
            .await
    }

    /// Loads the recipe's snapshot if it decodes and is still fresh.
    /// Stale or malformed snapshots are deleted and reported as absent.
    pub async fn load_session_snapshot(&self, params: &RecipeId) -> Result<Option<SessionSnapshot>> {
        let recipe_id = params.recipe_id.clone();
        let window = self.snapshot_freshness;
        self.with_db(move |db| {
            let Some(payload) = db.get_snapshot(&recipe_id)? else {
                return Ok(None);
            };
            match SessionSnapshot::from_blob(&payload) {
                Some(snapshot) if snapshot.is_fresh(Timestamp::now(), window) => {
                    debug!("Resuming session for '{recipe_id}'");
                    Ok(Some(snapshot))
                }
                Some(_) => {
                    debug!("Discarding stale session for '{recipe_id}'");
                    db.delete_snapshot(&recipe_id)?;
                    Ok(None)
                }
                None => {
                    warn!("Discarding unreadable session snapshot for '{recipe_id}'");
                    db.delete_snapshot(&recipe_id)?;
                    Ok(None)
                }
            }
        })
        .await
    }

    /// Removes the recipe's snapshot. Returns whether one existed.
    pub async fn clear_session_snapshot(&self, params: &RecipeId) -> Result<bool> {
        let recipe_id = params.recipe_id.clone();
        self.with_db(move |db| db.delete_snapshot(&recipe_id)).await
    }
}
