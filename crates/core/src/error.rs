use serde::Serialize;

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// Coarse classification the boundary layer uses to pick a status code
/// without inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    NotFound,
    /// A domain rule rejected the request (illegal transition, stale version,
    /// review before completion, missing identity).
    DomainRule,
    Validation,
    Timeout,
    Infrastructure,
}

impl CoreError {
    pub fn class(&self) -> ErrorClass {
        match self {
            CoreError::NotFound { .. } => ErrorClass::NotFound,
            CoreError::Validation(_) => ErrorClass::Validation,
            CoreError::Conflict(_) | CoreError::Unauthorized(_) => ErrorClass::DomainRule,
        }
    }

    /// Optimistic-concurrency failure for an entity whose version moved.
    pub fn stale(entity: &'static str, id: DbId) -> Self {
        CoreError::Conflict(format!("{entity} {id} was modified concurrently"))
    }
}
