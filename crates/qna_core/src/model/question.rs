//! Question entity.
//!
//! # Responsibility
//! - Own an embedded `Title` value object plus free-form contents.
//! - Track authorship and soft-delete state.
//!
//! # Invariants
//! - `title` is always a validated `Title`; there is no raw string path.
//! - Deletion is a tombstone (`deleted = true`), never a hard delete.

use crate::model::title::Title;
use crate::model::user::{User, UserKey};
use serde::{Deserialize, Serialize};

/// Surrogate key assigned by the store.
pub type QuestionKey = i64;

/// Question posted on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: Option<QuestionKey>,
    pub title: Title,
    pub contents: Option<String>,
    /// Key of the writing user, if known.
    pub writer_id: Option<UserKey>,
    pub deleted: bool,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Question {
    /// Creates a transient question.
    pub fn new(title: Title, contents: Option<String>) -> Self {
        Self {
            id: None,
            title,
            contents,
            writer_id: None,
            deleted: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Records `writer` as the author and returns the question.
    pub fn write_by(mut self, writer: &User) -> Self {
        self.writer_id = writer.id;
        self
    }

    /// Returns whether `user` wrote this question.
    ///
    /// Unsaved users own nothing.
    pub fn is_owner(&self, user: &User) -> bool {
        matches!((self.writer_id, user.id), (Some(writer), Some(id)) if writer == id)
    }

    /// Replaces the title value.
    pub fn change_title(&mut self, title: Title) {
        self.title = title;
    }

    pub fn soft_delete(&mut self) {
        self.deleted = true;
    }

    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    pub fn has_changes_from(&self, stored: &Question) -> bool {
        self.title != stored.title
            || self.contents != stored.contents
            || self.writer_id != stored.writer_id
            || self.deleted != stored.deleted
    }
}
