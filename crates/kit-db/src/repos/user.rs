//! User repository — the identity store.
//!
//! Users are created and listed here; the core never deletes them.

use chrono::Utc;

use kit_core::entities::User;
use kit_core::enums::UserRole;
use kit_core::ids::PREFIX_USER;

use crate::error::{StoreError, map_unique_violation};
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::KitService;

pub(crate) const USER_COLS: &str = "id, email, name, role, created_at, updated_at";

/// Parse a user whose 6 columns start at `base` in the row.
pub(crate) fn row_to_user(row: &libsql::Row, base: i32) -> Result<User, StoreError> {
    Ok(User {
        id: row.get(base)?,
        email: row.get(base + 1)?,
        name: row.get(base + 2)?,
        role: parse_enum(&row.get::<String>(base + 3)?)?,
        created_at: parse_datetime(&row.get::<String>(base + 4)?)?,
        updated_at: parse_datetime(&row.get::<String>(base + 5)?)?,
    })
}

/// Parse a LEFT JOINed user at `base`; `None` when the join found no row.
pub(crate) fn row_to_opt_user(row: &libsql::Row, base: i32) -> Result<Option<User>, StoreError> {
    match row.get::<Option<String>>(base)? {
        Some(_) => Ok(Some(row_to_user(row, base)?)),
        None => Ok(None),
    }
}

impl KitService {
    /// Create a user. Emails are unique across the directory.
    ///
    /// # Errors
    ///
    /// Returns `Conflict("email")` on a duplicate email, or `StoreError`
    /// if the INSERT fails.
    pub async fn create_user(
        &self,
        email: &str,
        name: &str,
        role: UserRole,
    ) -> Result<User, StoreError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_USER).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO users (id, email, name, role, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    email,
                    name,
                    role.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| map_unique_violation(e, "email"))?;

        tracing::info!(user = %id, %email, "user created");

        Ok(User {
            id,
            email: email.to_string(),
            name: name.to_string(),
            role,
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound("user")` when the ID does not exist.
    pub async fn get_user(&self, id: &str) -> Result<User, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {USER_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::not_found("user", id))?;
        row_to_user(&row, 0)
    }

    /// Whether a user with this ID exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn user_exists(&self, id: &str) -> Result<bool, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM users WHERE id = ?1", [id])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Fail with `NotFound("user")` unless the user exists.
    pub(crate) async fn require_user(&self, id: &str) -> Result<(), StoreError> {
        if self.user_exists(id).await? {
            Ok(())
        } else {
            Err(StoreError::not_found("user", id))
        }
    }

    /// List users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_users(&self, limit: u32) -> Result<Vec<User>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {USER_COLS} FROM users ORDER BY created_at, rowid LIMIT ?1"),
                [i64::from(limit)],
            )
            .await?;

        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row, 0)?);
        }
        Ok(users)
    }
}
