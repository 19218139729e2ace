#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Citizen report store backed by `SQLite`.
//!
//! Reports live in `data/reports.db` by default, in a `citizen_reports`
//! table whose columns follow the hosted schema the dashboard was designed
//! against: the location is kept as WKT `POINT(lng lat)` text and the
//! moderation state as a lowercase status name.

pub mod reports;

use std::path::Path;

use switchy_database::Database;
use switchy_database_connection::init_sqlite_rusqlite;
use thiserror::Error;

/// Default path for the report database.
pub const DEFAULT_DB_PATH: &str = "data/reports.db";

/// Errors from report store operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// A database query or command failed.
    #[error("Database error: {0}")]
    Database(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be read back.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Opens (or creates) the report database and ensures the schema exists.
///
/// # Errors
///
/// Returns [`DbError`] if the database cannot be opened or schema creation
/// fails.
pub async fn open_db(path: &Path) -> Result<Box<dyn Database>, DbError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = init_sqlite_rusqlite(Some(path)).map_err(|e| DbError::Database(e.to_string()))?;

    ensure_schema(db.as_ref()).await?;
    log::info!("Opened report store at {}", path.display());

    Ok(db)
}

/// Creates the report table if it doesn't already exist.
///
/// # Errors
///
/// Returns [`DbError`] if a statement fails.
pub async fn ensure_schema(db: &dyn Database) -> Result<(), DbError> {
    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS citizen_reports (
            id           TEXT PRIMARY KEY,
            report_type  TEXT NOT NULL,
            severity     INTEGER NOT NULL CHECK (severity BETWEEN 1 AND 5),
            description  TEXT,
            location     TEXT NOT NULL,
            user_id      TEXT NOT NULL,
            status       TEXT NOT NULL DEFAULT 'pending',
            reported_at  TEXT NOT NULL
        )",
    )
    .await
    .map_err(|e| DbError::Database(e.to_string()))?;

    db.exec_raw(
        "CREATE INDEX IF NOT EXISTS idx_citizen_reports_reported
         ON citizen_reports (reported_at)",
    )
    .await
    .map_err(|e| DbError::Database(e.to_string()))?;

    Ok(())
}
