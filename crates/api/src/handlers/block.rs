//! Handlers for blocks and their parking slots.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use parkline_core::error::CoreError;
use parkline_core::types::DbId;
use parkline_db::models::block::{Block, BlockWithSlots, CreateBlock, UpdateBlock};
use parkline_db::models::parking_slot::ParkingSlot;
use parkline_db::repositories::{BlockRepo, ParkingLotRepo, ParkingSlotRepo};
use parkline_db::services::LayoutService;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extractors::ActorId;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/parking-lots/{id}/blocks
///
/// Creates the block and its slots `"1"..="N"`.
pub async fn create(
    State(state): State<AppState>,
    actor: ActorId,
    Path(parking_lot_id): Path<DbId>,
    Json(input): Json<CreateBlock>,
) -> AppResult<(StatusCode, Json<DataResponse<BlockWithSlots>>)> {
    input.validate()?;
    let block = LayoutService::create_block(&state.pool, parking_lot_id, &input).await?;

    tracing::debug!(block_id = %block.block.id, actor_id = %actor.0, "Block created via API");
    Ok((StatusCode::CREATED, Json(DataResponse { data: block })))
}

/// GET /api/v1/parking-lots/{id}/blocks
pub async fn list_by_parking_lot(
    State(state): State<AppState>,
    Path(parking_lot_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Block>>>> {
    ParkingLotRepo::find_by_id(&state.pool, parking_lot_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ParkingLot",
            id: parking_lot_id,
        }))?;
    let blocks = BlockRepo::list_by_parking_lot(&state.pool, parking_lot_id).await?;
    Ok(Json(DataResponse { data: blocks }))
}

/// GET /api/v1/blocks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BlockWithSlots>>> {
    let block = LayoutService::find_block(&state.pool, id).await?;
    Ok(Json(DataResponse { data: block }))
}

/// PUT /api/v1/blocks/{id}
///
/// Slot capacity changes are recorded but never re-provision slots.
pub async fn update(
    State(state): State<AppState>,
    actor: ActorId,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlock>,
) -> AppResult<Json<DataResponse<Block>>> {
    input.validate()?;
    let block = BlockRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Block",
            id,
        }))?;

    tracing::info!(block_id = %id, actor_id = %actor.0, "Block updated");
    Ok(Json(DataResponse { data: block }))
}

/// GET /api/v1/blocks/{id}/slots
pub async fn list_slots(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ParkingSlot>>>> {
    BlockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Block",
            id,
        }))?;
    let slots = ParkingSlotRepo::list_by_block(&state.pool, id).await?;
    Ok(Json(DataResponse { data: slots }))
}
