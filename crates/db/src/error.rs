//! Error type returned by the transactional services.

use parkline_core::error::{CoreError, ErrorClass};

/// PostgreSQL `query_canceled`, raised when `statement_timeout` fires.
const PG_QUERY_CANCELED: &str = "57014";
/// PostgreSQL `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `foreign_key_violation`.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    pub fn class(&self) -> ErrorClass {
        match self {
            DbError::Core(core) => core.class(),
            DbError::Database(err) => classify_sqlx_error(err),
        }
    }
}

/// Map a sqlx error onto the coarse error classes.
pub fn classify_sqlx_error(err: &sqlx::Error) -> ErrorClass {
    match err {
        sqlx::Error::RowNotFound => ErrorClass::NotFound,
        sqlx::Error::PoolTimedOut => ErrorClass::Timeout,
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some(PG_QUERY_CANCELED) => ErrorClass::Timeout,
            Some(PG_UNIQUE_VIOLATION) => ErrorClass::DomainRule,
            Some(PG_FOREIGN_KEY_VIOLATION) => ErrorClass::Validation,
            _ => ErrorClass::Infrastructure,
        },
        _ => ErrorClass::Infrastructure,
    }
}
