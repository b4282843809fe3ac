//! User entity.
//!
//! # Responsibility
//! - Carry account fields for board members.
//! - Expose the mutable surface (`modify_name`) that repositories flush.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one on save.
//! - Column length bounds are enforced by the store, not by `User::new`.
//!   A too-long name surfaces as `RepoError::DataIntegrity` on save/flush.

use serde::{Deserialize, Serialize};

/// Surrogate key assigned by the store.
pub type UserKey = i64;

/// Column bound for `users.user_id`.
pub const MAX_USER_ID_LENGTH: usize = 20;
/// Column bound for `users.password`.
pub const MAX_PASSWORD_LENGTH: usize = 20;
/// Column bound for `users.name`.
pub const MAX_NAME_LENGTH: usize = 20;
/// Column bound for `users.email`.
pub const MAX_EMAIL_LENGTH: usize = 50;

/// Board member account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned key; `None` for transient users.
    pub id: Option<UserKey>,
    /// Login identifier, unique across users.
    pub user_id: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Display name.
    pub name: String,
    pub email: Option<String>,
    /// Unix epoch milliseconds, set by the store.
    pub created_at: Option<i64>,
    /// Unix epoch milliseconds, refreshed whenever a change is flushed.
    pub updated_at: Option<i64>,
}

impl User {
    /// Creates a transient user that has not been saved yet.
    pub fn new(
        user_id: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            password: password.into(),
            name: name.into(),
            email: Some(email.into()),
            created_at: None,
            updated_at: None,
        }
    }

    /// Renames the user in memory. Persisted on the next flush.
    pub fn modify_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns whether both values denote the same stored row.
    ///
    /// Transient users are never the same record as anything.
    pub fn is_same_record(&self, other: &User) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }

    /// Dirty check over the columns a flush may write.
    pub fn has_changes_from(&self, stored: &User) -> bool {
        self.user_id != stored.user_id
            || self.password != stored.password
            || self.name != stored.name
            || self.email != stored.email
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
