//! Board schema registry and bootstrap.
//!
//! # Responsibility
//! - Hold the board table definitions.
//! - Create them exactly once per database file.
//!
//! # Invariants
//! - Applied schema version is mirrored to `PRAGMA user_version`.
//! - A database stamped with a newer version is rejected, never rewritten.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Schema version stamped by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const BOARD_SCHEMA_SQL: &str = include_str!("0001_board.sql");

/// Tables every repository expects to find.
pub const BOARD_TABLES: &[&str] = &["users", "questions"];

/// Returns the schema version this binary writes and understands.
pub fn latest_version() -> u32 {
    SCHEMA_VERSION
}

/// Creates the board schema on a fresh database.
///
/// Databases already at `SCHEMA_VERSION` are left untouched.
pub fn apply_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;

    if current_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: SCHEMA_VERSION,
        });
    }

    if current_version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(BOARD_SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    Ok(())
}

/// Reads `PRAGMA user_version` from the connection.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
