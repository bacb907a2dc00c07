//! Service layer hosting all repository methods.
//!
//! `KitService` wraps `KitDb` (raw database access). All repo methods are
//! implemented as `impl KitService` blocks in `repos/`.
//!
//! Every mutation touching more than one row (lifecycle transitions,
//! asset deletion) follows this protocol:
//! 1. Validate preconditions against current state
//! 2. Begin transaction
//! 3. Execute all SQL statements
//! 4. Commit — or roll back everything on the first error

use crate::KitDb;
use crate::error::StoreError;

/// Orchestrates all Kitlog store operations.
pub struct KitService {
    db: KitDb,
}

impl KitService {
    /// Open a service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` — Path to the libSQL database file, or `":memory:"`
    ///   for tests.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or
    /// migrations fail.
    pub async fn new_local(db_path: &str) -> Result<Self, StoreError> {
        let db = KitDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `KitDb` (for testing).
    #[must_use]
    pub const fn from_db(db: KitDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &KitDb {
        &self.db
    }
}
