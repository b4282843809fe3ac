//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open the board store named by `QNA_DB_PATH` (in-memory when unset).
//! - Print version and row counts for quick local sanity checks.

use qna_core::db::schema::current_user_version;
use qna_core::db::{open_db, open_db_in_memory};
use qna_core::{core_version, init_logging, CoreConfig, SqliteUserRepository, UserRepository};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("qna_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(config.log_level, log_dir)?;
    }

    let conn = match config.db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let users = SqliteUserRepository::try_new(&conn)?;

    println!("qna_core version={}", core_version());
    println!("qna_core schema_version={}", current_user_version(&conn)?);
    println!("qna_core users={}", users.count()?);
    log::info!("event=cli_probe module=cli status=ok");
    Ok(())
}
