//! Route definitions for the `/parking-lots` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{block, parking_lot, time_frame};
use crate::state::AppState;

/// Routes mounted at `/api/v1/parking-lots`.
///
/// ```text
/// GET    /                                   -> list
/// POST   /                                   -> create
/// GET    /{id}                               -> get_by_id
/// DELETE /{id}                               -> delete
///
/// GET    /{id}/blocks                        -> block::list_by_parking_lot
/// POST   /{id}/blocks                        -> block::create
/// GET    /{id}/time-frames                   -> time_frame::list_by_parking_lot
/// POST   /{id}/time-frames                   -> time_frame::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(parking_lot::list).post(parking_lot::create))
        .route(
            "/{id}",
            get(parking_lot::get_by_id).delete(parking_lot::delete),
        )
        .route(
            "/{id}/blocks",
            get(block::list_by_parking_lot).post(block::create),
        )
        .route(
            "/{id}/time-frames",
            get(time_frame::list_by_parking_lot).post(time_frame::create),
        )
}

/// Routes mounted at `/api/v2/parking-lots`.
///
/// ```text
/// PUT    /{id}                               -> update_layout
/// ```
pub fn v2_router() -> Router<AppState> {
    Router::new().route("/{id}", put(parking_lot::update_layout))
}
