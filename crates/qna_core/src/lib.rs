//! Core domain logic for the Q&A board.
//! This crate owns the value-object invariants and the board persistence layer.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::question::{Question, QuestionKey};
pub use model::title::{Locale, Title, TitleError, MAX_TITLE_LENGTH};
pub use model::user::{User, UserKey, MAX_NAME_LENGTH};
pub use model::MIN_TEXT_LENGTH;
pub use repo::question_repo::{QuestionListQuery, QuestionRepository, SqliteQuestionRepository};
pub use repo::user_repo::{RepoError, RepoResult, SqliteUserRepository, UserRepository};
pub use repo::FlushOutcome;
pub use service::question_service::{QuestionService, QuestionServiceError};
pub use service::user_service::{RenameResult, UserService, UserServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
