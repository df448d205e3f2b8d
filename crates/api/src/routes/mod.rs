pub mod block;
pub mod health;
pub mod parking_lot;
pub mod ticket;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /parking-lots                                list, create
/// /parking-lots/{id}                           get (with layout), delete
/// /parking-lots/{id}/blocks                    list, create
/// /parking-lots/{id}/time-frames               list, create
///
/// /blocks/{id}                                 get, update
/// /blocks/{id}/slots                           list
///
/// /tickets                                     list, create
/// /tickets/extend                              extend (POST)
/// /tickets/procedure                           check-in / check-out (POST)
/// /tickets/{id}                                get with extension edges
/// /tickets/{id}/cancel                         cancel (POST)
/// /tickets/{id}/review                         review (POST)
///
/// /merchant/tickets                            parking lot listing
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/parking-lots", parking_lot::router())
        .nest("/blocks", block::router())
        .nest("/tickets", ticket::router())
        .nest("/merchant", ticket::merchant_router())
}

/// Build the `/api/v2` route tree.
///
/// ```text
/// /parking-lots/{id}                           structural update (PUT)
/// ```
pub fn api_v2_routes() -> Router<AppState> {
    Router::new().nest("/parking-lots", parking_lot::v2_router())
}
