//! Handlers for parking lot time frames.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use parkline_core::error::CoreError;
use parkline_core::types::DbId;
use parkline_db::models::time_frame::{CreateTimeFrame, TimeFrame};
use parkline_db::repositories::{ParkingLotRepo, TimeFrameRepo};
use parkline_db::services::LayoutService;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extractors::ActorId;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/parking-lots/{id}/time-frames
pub async fn create(
    State(state): State<AppState>,
    actor: ActorId,
    Path(parking_lot_id): Path<DbId>,
    Json(input): Json<CreateTimeFrame>,
) -> AppResult<(StatusCode, Json<DataResponse<TimeFrame>>)> {
    input.validate()?;
    let time_frame = LayoutService::create_time_frame(&state.pool, parking_lot_id, &input).await?;

    tracing::info!(
        time_frame_id = %time_frame.id,
        parking_lot_id = %parking_lot_id,
        actor_id = %actor.0,
        "Time frame created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: time_frame })))
}

/// GET /api/v1/parking-lots/{id}/time-frames
pub async fn list_by_parking_lot(
    State(state): State<AppState>,
    Path(parking_lot_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TimeFrame>>>> {
    ParkingLotRepo::find_by_id(&state.pool, parking_lot_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ParkingLot",
            id: parking_lot_id,
        }))?;
    let time_frames = TimeFrameRepo::list_by_parking_lot(&state.pool, parking_lot_id).await?;
    Ok(Json(DataResponse { data: time_frames }))
}
