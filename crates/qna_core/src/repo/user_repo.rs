//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide save/lookup/flush APIs over the `users` table.
//! - Translate SQLite constraint failures into integrity errors.
//!
//! # Invariants
//! - `flush` writes nothing when the stored row already matches.
//! - `updated_at` moves only when an UPDATE is actually issued.

use crate::db::DbError;
use crate::model::title::TitleError;
use crate::model::user::{User, UserKey};
use crate::repo::FlushOutcome;
use log::debug;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

const USER_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    password,
    name,
    email,
    created_at,
    updated_at
FROM users";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by board persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TitleError),
    Db(DbError),
    /// A column constraint rejected the write (length, uniqueness, FK).
    DataIntegrity(String),
    NotFound {
        entity: &'static str,
        id: i64,
    },
    /// The entity has no store-assigned key yet.
    Transient {
        entity: &'static str,
    },
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DataIntegrity(message) => write!(f, "data integrity violation: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Transient { entity } => write!(f, "{entity} has not been saved yet"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TitleError> for RepoError {
    fn from(value: TitleError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(err, message) = &value {
            if err.code == ErrorCode::ConstraintViolation {
                return Self::DataIntegrity(message.clone().unwrap_or_else(|| err.to_string()));
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for user persistence.
pub trait UserRepository {
    /// Inserts a transient user, or flushes an already saved one.
    ///
    /// Returns the stored record with key and timestamps populated.
    fn save(&self, user: &User) -> RepoResult<User>;
    fn find_by_id(&self, id: UserKey) -> RepoResult<Option<User>>;
    /// Looks up by login identifier.
    fn find_by_user_id(&self, user_id: &str) -> RepoResult<Option<User>>;
    /// Looks up by display name; the lowest key wins when names collide.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<User>>;
    /// Writes in-memory changes of a saved user, if there are any.
    fn flush(&self, user: &User) -> RepoResult<FlushOutcome>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a connection carrying the board schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_columns(
            conn,
            "users",
            &[
                "id",
                "user_id",
                "password",
                "name",
                "email",
                "created_at",
                "updated_at",
            ],
        )?;
        Ok(Self { conn })
    }

    fn find_one(&self, filter: &str, value: &dyn rusqlite::ToSql) -> RepoResult<Option<User>> {
        let mut stmt = self.conn.prepare(&format!(
            "{USER_SELECT_SQL} WHERE {filter} ORDER BY id ASC LIMIT 1;"
        ))?;
        let mut rows = stmt.query(&[value])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn save(&self, user: &User) -> RepoResult<User> {
        if let Some(id) = user.id {
            self.flush(user)?;
            return self
                .find_by_id(id)?
                .ok_or(RepoError::NotFound { entity: "user", id });
        }

        let now = now_epoch_ms();
        self.conn.execute(
            "INSERT INTO users (
                user_id,
                password,
                name,
                email,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?5);",
            params![
                user.user_id.as_str(),
                user.password.as_str(),
                user.name.as_str(),
                user.email.as_deref(),
                now,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("event=user_save module=repo status=ok user_key={id}");
        Ok(User {
            id: Some(id),
            created_at: Some(now),
            updated_at: Some(now),
            ..user.clone()
        })
    }

    fn find_by_id(&self, id: UserKey) -> RepoResult<Option<User>> {
        self.find_one("id = ?1", &id)
    }

    fn find_by_user_id(&self, user_id: &str) -> RepoResult<Option<User>> {
        self.find_one("user_id = ?1", &user_id)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<User>> {
        self.find_one("name = ?1", &name)
    }

    fn flush(&self, user: &User) -> RepoResult<FlushOutcome> {
        let id = user.id.ok_or(RepoError::Transient { entity: "user" })?;
        let stored = self
            .find_by_id(id)?
            .ok_or(RepoError::NotFound { entity: "user", id })?;

        if !user.has_changes_from(&stored) {
            debug!("event=user_flush module=repo status=unchanged user_key={id}");
            return Ok(FlushOutcome::Unchanged);
        }

        let updated_at = now_epoch_ms();
        self.conn.execute(
            "UPDATE users
             SET
                user_id = ?1,
                password = ?2,
                name = ?3,
                email = ?4,
                updated_at = ?5
             WHERE id = ?6;",
            params![
                user.user_id.as_str(),
                user.password.as_str(),
                user.name.as_str(),
                user.email.as_deref(),
                updated_at,
                id,
            ],
        )?;

        debug!("event=user_flush module=repo status=updated user_key={id}");
        Ok(FlushOutcome::Updated { updated_at })
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative users count `{count}`")))
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        id: Some(row.get("id")?),
        user_id: row.get("user_id")?,
        password: row.get("password")?,
        name: row.get("name")?,
        email: row.get("email")?,
        created_at: Some(row.get("created_at")?),
        updated_at: Some(row.get("updated_at")?),
    })
}

/// Current wall-clock time in Unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Verifies that `table` exists with every listed column.
pub(crate) fn ensure_columns(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    let present = table_columns(conn, table)?;
    for column in columns {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists = conn
        .query_row(
            "SELECT 1
             FROM sqlite_master
             WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(exists.is_some())
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::{now_epoch_ms, RepoError};
    use rusqlite::ffi;

    #[test]
    fn constraint_failures_map_to_data_integrity() {
        let err = rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_CONSTRAINT_CHECK),
            Some("CHECK constraint failed: length(name) <= 20".to_string()),
        );
        match RepoError::from(err) {
            RepoError::DataIntegrity(message) => assert!(message.contains("CHECK")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn other_sqlite_failures_stay_db_errors() {
        let err = rusqlite::Error::QueryReturnedNoRows;
        assert!(matches!(RepoError::from(err), RepoError::Db(_)));
    }

    #[test]
    fn now_epoch_ms_is_after_2020() {
        assert!(now_epoch_ms() > 1_577_836_800_000);
    }
}
