//! Builder for creating and configuring Library instances.

use std::path::{Path, PathBuf};

use jiff::SignedDuration;
use log::info;
use tokio::task;

use super::Library;
use crate::{
    brew::SNAPSHOT_FRESHNESS,
    db::Database,
    error::{BrewError, Result},
};

/// Builder for creating and configuring Library instances.
#[derive(Debug, Clone)]
pub struct LibraryBuilder {
    database_path: Option<PathBuf>,
    snapshot_freshness: SignedDuration,
}

impl LibraryBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            snapshot_freshness: SNAPSHOT_FRESHNESS,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/brewlab/brewlab.db` or `~/.local/share/brewlab/brewlab.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets how long a saved brew session stays resumable.
    pub fn with_snapshot_freshness(mut self, window: SignedDuration) -> Self {
        self.snapshot_freshness = window;
        self
    }

    /// Builds the library, creating the database file and seeding it if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns `BrewError::FileSystem` if the database directory cannot be created
    /// Returns `BrewError::Database` if database initialization fails
    pub async fn build(self) -> Result<Library> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| BrewError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), BrewError>(())
        })
        .await
        .map_err(BrewError::join)??;

        info!("Recipe library ready at {}", db_path.display());
        Ok(Library::new(db_path, self.snapshot_freshness))
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("brewlab")
            .place_data_file("brewlab.db")
            .map_err(|e| BrewError::XdgDirectory(e.to_string()))
    }
}

impl Default for LibraryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
