//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//! - Flush entity changes only when a tracked column actually differs.
//!
//! # Invariants
//! - Lookups return `Option` rather than failing on absence.
//! - Column constraint violations surface as `RepoError::DataIntegrity`.

pub mod question_repo;
pub mod user_repo;

/// Result of flushing an entity back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Stored row already matched; no UPDATE was issued.
    Unchanged,
    /// An UPDATE was issued and `updated_at` moved to the given value.
    Updated { updated_at: i64 },
}

impl FlushOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}
