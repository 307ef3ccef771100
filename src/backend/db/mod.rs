//! # Storage Engine
//!
//! SQLite persistence for users, posts and comments.
//!
//! ## Architecture
//!
//! - `Database`: connection pool, schema bootstrap and the bounded-time
//!   wrapper every storage operation goes through
//! - `StoreError`: classification of raw storage failures
//! - `schema.sql`: the three relations and their indexes
//!
//! Uniqueness and referential integrity are enforced by the schema itself
//! (UNIQUE and FOREIGN KEY constraints). Application code never checks
//! before inserting; it classifies the constraint violation afterwards.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use agora_forum::backend::db::Database;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::open("./forum.db".as_ref(), Duration::from_secs(5)).await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::shared::error::ForumError;

/// Connections kept by the pool
const MAX_CONNECTIONS: u32 = 8;

/// Raw storage failure, before translation into [`ForumError`]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation did not finish within the configured bound
    #[error("storage operation timed out after {0:?}")]
    Timeout(Duration),

    /// A UNIQUE constraint rejected the write
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A FOREIGN KEY constraint rejected the write
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// Any other database error
    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return Self::UniqueViolation(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKeyViolation(db_err.message().to_string());
            }
        }
        Self::Sqlx(err)
    }
}

impl StoreError {
    /// Whether the failure is transient (timeout or lost connection)
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Sqlx(err) => matches!(
                err,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            _ => false,
        }
    }
}

impl From<StoreError> for ForumError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(detail) => {
                tracing::debug!("Unique constraint violation: {}", detail);
                ForumError::account_taken()
            }
            StoreError::ForeignKeyViolation(detail) => {
                tracing::error!("Foreign key violation: {}", detail);
                ForumError::reference("record")
            }
            err if err.is_transient() => {
                tracing::error!("Transient storage failure: {}", err);
                ForumError::unavailable(err.to_string())
            }
            err => {
                tracing::error!("Storage failure: {:?}", err);
                ForumError::internal(err.to_string())
            }
        }
    }
}

/// SQLite database handle
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    op_timeout: Duration,
}

impl Database {
    /// Open or create the database file and bootstrap the schema
    ///
    /// Uses WAL mode so readers do not block the single writer, and enables
    /// foreign keys on every connection.
    pub async fn open(path: &Path, op_timeout: Duration) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(op_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(op_timeout)
            .connect_with(options)
            .await?;

        let db = Self { pool, op_timeout };
        db.init_schema().await?;

        tracing::info!("Database ready at {}", path.display());
        Ok(db)
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run one storage operation under the configured timeout
    pub async fn run<T, F>(&self, operation: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => {
                tracing::error!("Storage operation '{}' timed out", operation);
                Err(StoreError::Timeout(self.op_timeout))
            }
        }
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        self.run(
            "init_schema",
            sqlx::raw_sql(include_str!("schema.sql")).execute(&self.pool),
        )
        .await?;
        Ok(())
    }
}
