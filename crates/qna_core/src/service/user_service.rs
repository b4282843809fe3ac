//! User use-case service.
//!
//! # Responsibility
//! - Register users and look them up by login id or display name.
//! - Apply renames through the repository's dirty-checked flush.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Renaming to the current name issues no write.

use crate::model::user::User;
use crate::repo::user_repo::{RepoError, RepoResult, UserRepository};
use crate::repo::FlushOutcome;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for user use-cases.
#[derive(Debug)]
pub enum UserServiceError {
    /// No user is registered under the login id.
    UserNotFound(String),
    Repo(RepoError),
}

impl Display for UserServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserNotFound(user_id) => write!(f, "user not found: `{user_id}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UserServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UserNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for UserServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Outcome of a rename request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameResult {
    pub user: User,
    pub flush: FlushOutcome,
}

pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new user and returns the stored record.
    pub fn join(&self, user: &User) -> RepoResult<User> {
        self.repo.save(user)
    }

    pub fn find_by_user_id(&self, user_id: &str) -> RepoResult<Option<User>> {
        self.repo.find_by_user_id(user_id)
    }

    pub fn find_by_name(&self, name: &str) -> RepoResult<Option<User>> {
        self.repo.find_by_name(name)
    }

    /// Renames the user registered under `user_id`.
    ///
    /// # Contract
    /// - Missing user -> `UserServiceError::UserNotFound`.
    /// - Name longer than the column bound -> `RepoError::DataIntegrity`.
    /// - Same name as stored -> `FlushOutcome::Unchanged`.
    pub fn rename(&self, user_id: &str, name: &str) -> Result<RenameResult, UserServiceError> {
        let mut user = self
            .repo
            .find_by_user_id(user_id)?
            .ok_or_else(|| UserServiceError::UserNotFound(user_id.to_string()))?;

        user.modify_name(name);
        let flush = self.repo.flush(&user)?;
        if let FlushOutcome::Updated { updated_at } = flush {
            user.updated_at = Some(updated_at);
        }

        Ok(RenameResult { user, flush })
    }
}
