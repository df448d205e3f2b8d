//! Route definitions for the `/blocks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::block;
use crate::state::AppState;

/// Routes mounted at `/api/v1/blocks`.
///
/// ```text
/// GET    /{id}                               -> get_by_id
/// PUT    /{id}                               -> update
/// GET    /{id}/slots                         -> list_slots
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(block::get_by_id).put(block::update))
        .route("/{id}/slots", get(block::list_slots))
}
