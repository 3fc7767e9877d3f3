//! SQLite-backed entity store
//!
//! This module owns the three tables and their integrity constraints:
//! - Every role references a live department (cascade on delete)
//! - Every employee references a live role (cascade on update/delete)
//! - An employee's manager, if set, is a live employee (cascade on update/delete)
//!
//! The store never resolves labels and never guesses ids. Callers hand it
//! ids that were already resolved; a bad id fails with `ForeignKeyViolation`.
//! Nothing is cached between calls, so every read reflects the database as
//! of that read.

mod queries;
mod schema;

use std::path::Path;

use rusqlite::{ffi, Connection, ErrorCode};
use thiserror::Error;

use crate::core::entity::EntityKind;

/// Path value that selects an in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// The entity store backed by SQLite
pub struct EntityStore {
    conn: Connection,
}

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A {kind} with that value already exists ({detail})")]
    DuplicateKey { kind: EntityKind, detail: String },

    #[error("The {kind} references a record that does not exist ({detail})")]
    ForeignKeyViolation { kind: EntityKind, detail: String },

    #[error("No {kind} with ID {id}")]
    NotFound { kind: EntityKind, id: i64 },

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

impl StoreError {
    /// Classify a SQLite failure raised while touching `kind`'s table
    pub(crate) fn from_sqlite(kind: EntityKind, err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(ref failure, ref message) = err {
            let detail = message.clone().unwrap_or_else(|| failure.to_string());
            match failure.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return StoreError::DuplicateKey { kind, detail };
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return StoreError::ForeignKeyViolation { kind, detail };
                }
                _ => {}
            }
            if is_transport_failure(failure.code) {
                return StoreError::Unavailable(detail);
            }
        }
        StoreError::Query(err)
    }
}

fn is_transport_failure(code: ErrorCode) -> bool {
    matches!(
        code,
        ErrorCode::CannotOpen
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::SystemIoFailure
            | ErrorCode::NotADatabase
            | ErrorCode::DatabaseCorrupt
    )
}

fn unavailable(err: rusqlite::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

impl EntityStore {
    /// Open (or create) the database at `path` and ensure the schema exists
    ///
    /// The special path `:memory:` opens a private in-memory database.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if path.as_os_str() == IN_MEMORY {
            return Self::open_in_memory();
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            }
        }

        let conn = Connection::open(path).map_err(unavailable)?;
        tracing::debug!(path = %path.display(), "opened store");
        Self::from_connection(conn)
    }

    /// Open a private in-memory database with the schema applied
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(unavailable)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        // Foreign keys are off by default in SQLite; cascades depend on them
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(unavailable)?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Release the underlying connection
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| unavailable(e))?;
        tracing::debug!("closed store");
        Ok(())
    }
}
