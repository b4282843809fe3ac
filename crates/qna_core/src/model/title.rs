//! Title value object for questions.
//!
//! # Responsibility
//! - Hold a question title whose length is known to be in bounds.
//! - Provide value equality over the wrapped text.
//!
//! # Invariants
//! - `MIN_TEXT_LENGTH <= chars <= MAX_TITLE_LENGTH` for every value built
//!   from external input.
//! - Titles never contain NUL, so every valid title fits the `title` column.
//! - No mutator exists; a new title means a new `Title`.
//! - Persisted as the `title` column (NOT NULL, at most 100 chars).

use crate::model::{text_length, MIN_TEXT_LENGTH};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Upper bound for title length, in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Message language for validation errors shown to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ko,
}

/// Rejection reasons for title construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleError {
    /// No text was supplied at all.
    Missing,
    /// Text length falls outside `[min, max]`.
    InvalidLength {
        length: usize,
        min: usize,
        max: usize,
    },
    /// Text contains a NUL character.
    ContainsNul,
}

impl TitleError {
    /// Returns the user-facing message in the requested language.
    pub fn localized_message(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.to_string(),
            Locale::Ko if *self == Self::ContainsNul => {
                "질문의 제목에는 NUL 문자를 사용할 수 없습니다.".to_string()
            }
            Locale::Ko => format!(
                "질문의 제목 길이는 최소 {MIN_TEXT_LENGTH}이상 {MAX_TITLE_LENGTH}이하여야 합니다."
            ),
        }
    }
}

impl Display for TitleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(
                f,
                "question title is required ({MIN_TEXT_LENGTH}..={MAX_TITLE_LENGTH} characters)"
            ),
            Self::InvalidLength { length, min, max } => write!(
                f,
                "question title must be {min}..={max} characters, got {length}"
            ),
            Self::ContainsNul => write!(f, "question title must not contain NUL characters"),
        }
    }
}

impl Error for TitleError {}

/// Bounded-length question title.
///
/// Equality and hashing are structural over the wrapped text, so two titles
/// built from the same string are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Builds a title, validating its length.
    ///
    /// # Errors
    /// - `TitleError::InvalidLength` when the text is empty or longer than
    ///   `MAX_TITLE_LENGTH` characters.
    /// - `TitleError::ContainsNul` when the text contains `'\0'`.
    pub fn new(text: impl Into<String>) -> Result<Self, TitleError> {
        let text = text.into();
        validate_title(&text)?;
        Ok(Self(text))
    }

    /// Builds a title from possibly absent input.
    ///
    /// `None` is rejected with `TitleError::Missing`.
    pub fn from_optional(text: Option<String>) -> Result<Self, TitleError> {
        match text {
            Some(text) => Self::new(text),
            None => Err(TitleError::Missing),
        }
    }

    /// Rehydrates a title read back from the `title` column.
    ///
    /// Only the repository layer calls this; the column carries a CHECK
    /// constraint with the same bounds, so the value was validated on write.
    pub(crate) fn from_trusted_storage(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Title {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Title {
    type Error = TitleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Title {
    type Error = TitleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Title {
    type Err = TitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Title {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Self::from_optional(raw).map_err(serde::de::Error::custom)
    }
}

fn validate_title(text: &str) -> Result<(), TitleError> {
    if text.contains('\0') {
        return Err(TitleError::ContainsNul);
    }
    let length = text_length(text);
    if !(MIN_TEXT_LENGTH..=MAX_TITLE_LENGTH).contains(&length) {
        return Err(TitleError::InvalidLength {
            length,
            min: MIN_TEXT_LENGTH,
            max: MAX_TITLE_LENGTH,
        });
    }
    Ok(())
}
