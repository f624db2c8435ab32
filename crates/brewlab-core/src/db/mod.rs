//! SQLite storage for recipes, share links and session snapshots.
//!
//! A [`Database`] owns one connection. Opening it applies the embedded schema,
//! runs additive migrations and seeds the legacy recipes, so a fresh file is
//! immediately usable. Query groups live in their own modules as `impl`
//! blocks on [`Database`].

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod recipe_queries;
mod rows;
pub mod share_queries;
pub mod snapshot_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and prepares it.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let mut db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// An empty in-memory database, for tests and throwaway sessions.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let mut db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
