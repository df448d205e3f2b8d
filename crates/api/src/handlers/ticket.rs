//! Handlers for the ticket lifecycle.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use parkline_core::error::CoreError;
use parkline_core::types::DbId;
use parkline_db::models::ticket::{
    CreateTicket, ExtendTicket, ExtendedTicket, ProcedureRequest, ReviewTicket, Ticket,
    TicketDetail, TicketListParams, TicketWithExtends,
};
use parkline_db::services::TicketService;
use validator::Validate;

use crate::error::AppResult;
use crate::extractors::ActorId;
use crate::query::MerchantTicketQuery;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/tickets
pub async fn create(
    State(state): State<AppState>,
    actor: ActorId,
    Json(input): Json<CreateTicket>,
) -> AppResult<(StatusCode, Json<DataResponse<Ticket>>)> {
    input.validate()?;
    let ticket = TicketService::create(&state.pool, &input, actor.0).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: ticket })))
}

/// GET /api/v1/tickets
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TicketListParams>,
) -> AppResult<Json<DataResponse<Vec<TicketDetail>>>> {
    let tickets = TicketService::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: tickets }))
}

/// POST /api/v1/tickets/extend
pub async fn extend(
    State(state): State<AppState>,
    actor: ActorId,
    Json(input): Json<ExtendTicket>,
) -> AppResult<(StatusCode, Json<DataResponse<ExtendedTicket>>)> {
    input.validate()?;
    let extended = TicketService::extend(&state.pool, &input, actor.0).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: extended })))
}

/// POST /api/v1/tickets/procedure
pub async fn procedure(
    State(state): State<AppState>,
    actor: ActorId,
    Json(input): Json<ProcedureRequest>,
) -> AppResult<Json<DataResponse<Ticket>>> {
    let ticket = TicketService::procedure(&state.pool, &input, actor.0).await?;
    Ok(Json(DataResponse { data: ticket }))
}

/// GET /api/v1/tickets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TicketWithExtends>>> {
    let ticket = TicketService::get_with_extends(&state.pool, id).await?;
    Ok(Json(DataResponse { data: ticket }))
}

/// POST /api/v1/tickets/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    actor: ActorId,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Ticket>>> {
    let ticket = TicketService::cancel(&state.pool, id, actor.0).await?;
    Ok(Json(DataResponse { data: ticket }))
}

/// POST /api/v1/tickets/{id}/review
pub async fn review(
    State(state): State<AppState>,
    actor: ActorId,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewTicket>,
) -> AppResult<Json<DataResponse<Ticket>>> {
    input.validate()?;
    let ticket = TicketService::review(&state.pool, id, &input, actor.0).await?;
    Ok(Json(DataResponse { data: ticket }))
}

/// GET /api/v1/merchant/tickets?parking_lot_id=&state=
pub async fn list_for_merchant(
    State(state): State<AppState>,
    Query(query): Query<MerchantTicketQuery>,
) -> AppResult<Json<DataResponse<Vec<TicketDetail>>>> {
    let params = query
        .into_params()
        .ok_or_else(|| CoreError::Validation("parking_lot_id is required".into()))?;
    let tickets = TicketService::list_for_company(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: tickets }))
}
