//! Domain model for the Q&A board.
//!
//! # Responsibility
//! - Define value objects that validate themselves at construction time.
//! - Define entities whose identity is assigned by the store.
//!
//! # Invariants
//! - Value objects are immutable; a change means building a new value.
//! - Entities compare as "the same record" by surrogate key only.
//! - Text lengths are counted in characters, never bytes.

pub mod question;
pub mod title;
pub mod user;

/// Domain-wide minimum length for free-text values.
pub const MIN_TEXT_LENGTH: usize = 1;

/// Returns the character length used by every bounded text check.
pub fn text_length(value: &str) -> usize {
    value.chars().count()
}
