//! # kit-db
//!
//! libSQL storage and lifecycle engine for Kitlog.
//!
//! Handles all relational state: the user directory, current asset
//! records, and the append-only asset history. The lifecycle engine
//! (`KitService::transition_asset`) is the only path that changes an
//! asset's status/ownership with an audit record; both writes happen in
//! one transaction so current state and history can never diverge.
//!
//! Uses the `libsql` crate (C `SQLite` fork) — embedded local files or
//! `:memory:` for tests, with per-connection foreign key enforcement.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::StoreError;
use libsql::Builder;

/// Central database handle for all Kitlog state operations.
///
/// Wraps a libSQL database and connection, and provides ID generation.
/// Repository methods live on [`service::KitService`].
pub struct KitDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl KitDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let kit_db = Self { db, conn };
        kit_db.run_migrations().await?;
        Ok(kit_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g. `"ast-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends
    /// the prefix.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, StoreError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
