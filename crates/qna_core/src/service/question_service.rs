//! Question use-case service.
//!
//! # Responsibility
//! - Turn raw title input into a validated `Title` before persistence.
//! - Enforce authorship on deletion.
//!
//! # Invariants
//! - An invalid title never reaches the repository.
//! - Only the writer may delete a question; deletion is a tombstone.

use crate::model::question::{Question, QuestionKey};
use crate::model::title::{Title, TitleError};
use crate::model::user::User;
use crate::repo::question_repo::{QuestionListQuery, QuestionRepository};
use crate::repo::user_repo::{RepoError, RepoResult};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for question use-cases.
#[derive(Debug)]
pub enum QuestionServiceError {
    InvalidTitle(TitleError),
    /// The writer has not been saved, so authorship cannot be recorded.
    WriterNotSaved,
    QuestionNotFound(QuestionKey),
    /// The acting user did not write the question.
    NotOwner(QuestionKey),
    Repo(RepoError),
}

impl Display for QuestionServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(err) => write!(f, "{err}"),
            Self::WriterNotSaved => write!(f, "question writer must be saved first"),
            Self::QuestionNotFound(id) => write!(f, "question not found: {id}"),
            Self::NotOwner(id) => write!(f, "only the writer may delete question {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for QuestionServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTitle(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TitleError> for QuestionServiceError {
    fn from(value: TitleError) -> Self {
        Self::InvalidTitle(value)
    }
}

impl From<RepoError> for QuestionServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub struct QuestionService<R: QuestionRepository> {
    repo: R,
}

impl<R: QuestionRepository> QuestionService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Posts a new question written by `writer`.
    pub fn ask(
        &self,
        title: impl Into<String>,
        contents: Option<String>,
        writer: &User,
    ) -> Result<Question, QuestionServiceError> {
        if !writer.is_persisted() {
            return Err(QuestionServiceError::WriterNotSaved);
        }
        let title = Title::new(title)?;
        let question = Question::new(title, contents).write_by(writer);
        Ok(self.repo.save(&question)?)
    }

    pub fn find(&self, id: QuestionKey) -> RepoResult<Option<Question>> {
        self.repo.find_by_id(id, false)
    }

    pub fn list_active(&self) -> RepoResult<Vec<Question>> {
        self.repo.list(&QuestionListQuery::default())
    }

    /// Soft-deletes a question on behalf of `user`.
    pub fn delete(&self, id: QuestionKey, user: &User) -> Result<(), QuestionServiceError> {
        let mut question = self
            .repo
            .find_by_id(id, false)?
            .ok_or(QuestionServiceError::QuestionNotFound(id))?;

        if !question.is_owner(user) {
            warn!("event=question_delete module=service status=denied question_key={id}");
            return Err(QuestionServiceError::NotOwner(id));
        }

        question.soft_delete();
        self.repo.flush(&question)?;
        Ok(())
    }
}
