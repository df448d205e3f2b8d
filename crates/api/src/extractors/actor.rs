//! Acting-user extractor.
//!
//! Authentication happens in front of this service; the gateway forwards
//! the authenticated user's id in the `x-actor-id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use parkline_core::error::CoreError;
use parkline_core::types::DbId;

use crate::error::AppError;

/// Header carrying the acting user's id.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// The user performing the request, stamped into `creator_id` / `updater_id`.
///
/// ```ignore
/// async fn cancel(actor: ActorId, Path(id): Path<DbId>) -> AppResult<...> {
///     TicketService::cancel(&state.pool, id, actor.0).await?;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorId(pub DbId);

impl<S> FromRequestParts<S> for ActorId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {ACTOR_HEADER} header"
                )))
            })?;

        let id = raw.trim().parse::<DbId>().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(format!(
                "Invalid {ACTOR_HEADER} header"
            )))
        })?;

        Ok(ActorId(id))
    }
}
