//! Share link model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A revocable public link to one published version of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    pub id: String,
    pub recipe_id: String,
    /// Opaque URL token
    pub token: String,
    pub published_version_id: String,
    pub created_by: String,
    #[serde(default)]
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl ShareLink {
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }
}
