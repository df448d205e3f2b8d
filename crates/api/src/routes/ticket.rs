//! Route definitions for tickets.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ticket;
use crate::state::AppState;

/// Routes mounted at `/api/v1/tickets`.
///
/// ```text
/// GET    /                                   -> list
/// POST   /                                   -> create
/// POST   /extend                             -> extend
/// POST   /procedure                          -> procedure
/// GET    /{id}                               -> get_by_id
/// POST   /{id}/cancel                        -> cancel
/// POST   /{id}/review                        -> review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ticket::list).post(ticket::create))
        .route("/extend", post(ticket::extend))
        .route("/procedure", post(ticket::procedure))
        .route("/{id}", get(ticket::get_by_id))
        .route("/{id}/cancel", post(ticket::cancel))
        .route("/{id}/review", post(ticket::review))
}

/// Routes mounted at `/api/v1/merchant`.
///
/// ```text
/// GET    /tickets?parking_lot_id=&state=     -> list_for_merchant
/// ```
pub fn merchant_router() -> Router<AppState> {
    Router::new().route("/tickets", get(ticket::list_for_merchant))
}
