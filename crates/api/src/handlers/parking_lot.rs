//! Handlers for the `/parking-lots` resource, including the v2 structural
//! update.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use parkline_core::error::CoreError;
use parkline_core::types::DbId;
use parkline_db::models::parking_lot::{
    CreateParkingLot, ParkingLot, ParkingLotListParams, ParkingLotWithLayout,
    UpdateParkingLotLayout,
};
use parkline_db::repositories::ParkingLotRepo;
use parkline_db::services::LayoutService;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extractors::ActorId;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/parking-lots
pub async fn create(
    State(state): State<AppState>,
    actor: ActorId,
    Json(input): Json<CreateParkingLot>,
) -> AppResult<(StatusCode, Json<DataResponse<ParkingLot>>)> {
    input.validate()?;
    let parking_lot = ParkingLotRepo::create(&state.pool, &input, actor.0).await?;

    tracing::info!(parking_lot_id = %parking_lot.id, actor_id = %actor.0, "Parking lot created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: parking_lot })))
}

/// GET /api/v1/parking-lots
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ParkingLotListParams>,
) -> AppResult<Json<DataResponse<Vec<ParkingLot>>>> {
    let parking_lots = ParkingLotRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: parking_lots }))
}

/// GET /api/v1/parking-lots/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ParkingLotWithLayout>>> {
    let parking_lot = LayoutService::find_with_layout(&state.pool, id).await?;
    Ok(Json(DataResponse { data: parking_lot }))
}

/// DELETE /api/v1/parking-lots/{id}
pub async fn delete(
    State(state): State<AppState>,
    actor: ActorId,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ParkingLotRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(parking_lot_id = %id, actor_id = %actor.0, "Parking lot deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ParkingLot",
            id,
        }))
    }
}

/// PUT /api/v2/parking-lots/{id}
///
/// Replaces the parking lot's blocks and time frames with the declared sets.
pub async fn update_layout(
    State(state): State<AppState>,
    actor: ActorId,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateParkingLotLayout>,
) -> AppResult<Json<DataResponse<ParkingLotWithLayout>>> {
    input.validate()?;
    let parking_lot = LayoutService::reconcile(&state.pool, id, &input, actor.0).await?;
    Ok(Json(DataResponse { data: parking_lot }))
}
