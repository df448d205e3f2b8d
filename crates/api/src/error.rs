use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parkline_core::error::{CoreError, ErrorClass};
use parkline_db::error::{classify_sqlx_error, DbError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `parkline_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(core) => AppError::Core(core),
            DbError::Database(db) => AppError::Database(db),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            AppError::Database(err) => database_response(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Map a sqlx error onto a status, error code and client-safe message.
fn database_response(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match classify_sqlx_error(err) {
        ErrorClass::NotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        ErrorClass::Timeout => {
            tracing::warn!(error = %err, "Database operation timed out");
            (
                StatusCode::GATEWAY_TIMEOUT,
                "TIMEOUT",
                "The database did not respond in time".to_string(),
            )
        }
        ErrorClass::DomainRule => {
            let constraint = constraint_name(err);
            (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {constraint}"),
            )
        }
        ErrorClass::Validation => {
            let constraint = constraint_name(err);
            (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Referenced record does not exist: {constraint}"),
            )
        }
        ErrorClass::Infrastructure => {
            tracing::error!(error = %err, "Database error");
            internal()
        }
    }
}

fn constraint_name(err: &sqlx::Error) -> &str {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint().unwrap_or("unknown"),
        _ => "unknown",
    }
}
