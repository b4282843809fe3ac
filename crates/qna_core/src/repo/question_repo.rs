//! Question repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide save/lookup/list/flush APIs over the `questions` table.
//! - Rehydrate the embedded `Title` from the `title` column.
//!
//! # Invariants
//! - Default lookups hide soft-deleted questions.
//! - `flush` writes nothing when the stored row already matches.

use crate::model::question::{Question, QuestionKey};
use crate::model::title::Title;
use crate::model::user::UserKey;
use crate::repo::user_repo::{ensure_columns, now_epoch_ms, RepoError, RepoResult};
use crate::repo::FlushOutcome;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const QUESTION_SELECT_SQL: &str = "SELECT
    id,
    title,
    contents,
    writer_id,
    deleted,
    created_at,
    updated_at
FROM questions";

/// Query options for listing questions.
#[derive(Debug, Clone, Default)]
pub struct QuestionListQuery {
    pub writer_id: Option<UserKey>,
    pub include_deleted: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for question persistence.
pub trait QuestionRepository {
    /// Inserts a transient question, or flushes an already saved one.
    fn save(&self, question: &Question) -> RepoResult<Question>;
    fn find_by_id(&self, id: QuestionKey, include_deleted: bool) -> RepoResult<Option<Question>>;
    /// Lists questions, newest key first.
    fn list(&self, query: &QuestionListQuery) -> RepoResult<Vec<Question>>;
    fn flush(&self, question: &Question) -> RepoResult<FlushOutcome>;
}

/// SQLite-backed question repository.
pub struct SqliteQuestionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuestionRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_columns(
            conn,
            "questions",
            &[
                "id",
                "title",
                "contents",
                "writer_id",
                "deleted",
                "created_at",
                "updated_at",
            ],
        )?;
        Ok(Self { conn })
    }

    /// Lists questions that are not soft-deleted.
    pub fn find_active(&self) -> RepoResult<Vec<Question>> {
        self.list(&QuestionListQuery::default())
    }
}

impl QuestionRepository for SqliteQuestionRepository<'_> {
    fn save(&self, question: &Question) -> RepoResult<Question> {
        if let Some(id) = question.id {
            self.flush(question)?;
            return self.find_by_id(id, true)?.ok_or(RepoError::NotFound {
                entity: "question",
                id,
            });
        }

        let now = now_epoch_ms();
        self.conn.execute(
            "INSERT INTO questions (
                title,
                contents,
                writer_id,
                deleted,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?5);",
            params![
                question.title.as_str(),
                question.contents.as_deref(),
                question.writer_id,
                bool_to_int(question.deleted),
                now,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("event=question_save module=repo status=ok question_key={id}");
        Ok(Question {
            id: Some(id),
            created_at: Some(now),
            updated_at: Some(now),
            ..question.clone()
        })
    }

    fn find_by_id(&self, id: QuestionKey, include_deleted: bool) -> RepoResult<Option<Question>> {
        let mut stmt = self.conn.prepare(&format!(
            "{QUESTION_SELECT_SQL}
             WHERE id = ?1
               AND (?2 = 1 OR deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id, bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_question_row(row)?));
        }

        Ok(None)
    }

    fn list(&self, query: &QuestionListQuery) -> RepoResult<Vec<Question>> {
        let mut sql = format!("{QUESTION_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND deleted = 0");
        }

        if let Some(writer_id) = query.writer_id {
            sql.push_str(" AND writer_id = ?");
            bind_values.push(Value::Integer(writer_id));
        }

        sql.push_str(" ORDER BY id DESC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut questions = Vec::new();

        while let Some(row) = rows.next()? {
            questions.push(parse_question_row(row)?);
        }

        Ok(questions)
    }

    fn flush(&self, question: &Question) -> RepoResult<FlushOutcome> {
        let id = question
            .id
            .ok_or(RepoError::Transient { entity: "question" })?;
        let stored = self.find_by_id(id, true)?.ok_or(RepoError::NotFound {
            entity: "question",
            id,
        })?;

        if !question.has_changes_from(&stored) {
            debug!("event=question_flush module=repo status=unchanged question_key={id}");
            return Ok(FlushOutcome::Unchanged);
        }

        let updated_at = now_epoch_ms();
        self.conn.execute(
            "UPDATE questions
             SET
                title = ?1,
                contents = ?2,
                writer_id = ?3,
                deleted = ?4,
                updated_at = ?5
             WHERE id = ?6;",
            params![
                question.title.as_str(),
                question.contents.as_deref(),
                question.writer_id,
                bool_to_int(question.deleted),
                updated_at,
                id,
            ],
        )?;

        debug!("event=question_flush module=repo status=updated question_key={id}");
        Ok(FlushOutcome::Updated { updated_at })
    }
}

fn parse_question_row(row: &Row<'_>) -> RepoResult<Question> {
    let deleted = match row.get::<_, i64>("deleted")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid deleted value `{other}` in questions.deleted"
            )));
        }
    };

    Ok(Question {
        id: Some(row.get("id")?),
        title: Title::from_trusted_storage(row.get("title")?),
        contents: row.get("contents")?,
        writer_id: row.get("writer_id")?,
        deleted,
        created_at: Some(row.get("created_at")?),
        updated_at: Some(row.get("updated_at")?),
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
