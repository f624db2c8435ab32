//! High-level recipe library API.
//!
//! [`Library`] is the repository the CLI and MCP layers are handed. It is
//! built once with [`LibraryBuilder`] and passed down explicitly; there is no
//! process-wide client. Each operation opens its own [`Database`] inside
//! `spawn_blocking`, so callers on the async runtime never block on SQLite.
//!
//! ## Submodules
//!
//! - [`builder`]: configuration and database bootstrap
//! - [`recipe_ops`]: listing, lookup, drafts, publishing and remixing
//! - [`share_ops`]: share links and token resolution
//! - [`session_ops`]: brew plans and session snapshots
//!
//! ```rust,no_run
//! use brewlab_core::{params::RecipeSlug, LibraryBuilder};
//!
//! # async fn example() -> brewlab_core::Result<()> {
//! let library = LibraryBuilder::new()
//!     .with_database_path(Some("brewlab.db"))
//!     .build()
//!     .await?;
//!
//! let recipe = library
//!     .require_recipe_by_slug(&RecipeSlug { slug: "hario-v60".to_string() })
//!     .await?;
//! let remix = library.remix_recipe(&recipe, "local").await?;
//! assert!(remix.slug.starts_with("hario-v60-remix-"));
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use jiff::SignedDuration;
use tokio::task;

use crate::{
    db::Database,
    error::{BrewError, Result},
};

pub mod builder;
pub mod recipe_ops;
pub mod session_ops;
pub mod share_ops;


pub use builder::LibraryBuilder;

/// Length of generated recipe ids.
pub const RECIPE_ID_LEN: usize = 12;
/// Length of generated share tokens.
pub const SHARE_TOKEN_LEN: usize = 10;

/// Recipe repository backed by a SQLite file.
#[derive(Debug, Clone)]
pub struct Library {
    pub(crate) db_path: PathBuf,
    pub(crate) snapshot_freshness: SignedDuration,
}

impl Library {
    pub(crate) fn new(db_path: PathBuf, snapshot_freshness: SignedDuration) -> Self {
        Self {
            db_path,
            snapshot_freshness,
        }
    }

    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs `op` against a freshly opened database on the blocking pool.
    async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(BrewError::join)?
    }
}

/// Random lowercase hex id of `len` characters (at most 32).
pub(crate) fn short_id(len: usize) -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(len);
    id
}
