//! Parking lot entity model and DTOs.
//!
//! A parking lot owns an ordered set of blocks and time frames. The
//! structural update DTO ([`UpdateParkingLotLayout`]) declares the full
//! desired child sets; see `services::layout`.

use parkline_core::slot::MAX_BLOCK_SLOTS;
use parkline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::block::BlockWithSlots;
use super::time_frame::TimeFrame;

/// Parking lot is registered but not yet open for bookings.
pub const STATUS_PENDING: &str = "pending";

/// A row from the `parking_lot` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ParkingLot {
    pub id: DbId,
    pub company_id: DbId,
    pub name: String,
    pub description: String,
    pub address: String,
    /// Opening time.
    pub start_time: Option<Timestamp>,
    /// Closing time.
    pub end_time: Option<Timestamp>,
    pub lat: f64,
    #[sqlx(rename = "lng")]
    pub long: f64,
    /// `pending`, `active` or `inactive`.
    pub status: String,
    /// Optimistic-concurrency token, bumped on every structural update.
    pub version: i64,
    pub creator_id: Option<DbId>,
    pub updater_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A parking lot with its live blocks (and their slots) and time frames.
#[derive(Debug, Clone, Serialize)]
pub struct ParkingLotWithLayout {
    #[serde(flatten)]
    pub parking_lot: ParkingLot,
    pub blocks: Vec<BlockWithSlots>,
    pub time_frames: Vec<TimeFrame>,
}

/// DTO for creating a parking lot.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateParkingLot {
    pub company_id: DbId,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub long: Option<f64>,
}

/// Filters for listing parking lots.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParkingLotListParams {
    pub company_id: Option<DbId>,
    /// Case-insensitive name prefix.
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A block in a structural update. No id (or the nil id) means "create".
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeclaredBlock {
    pub id: Option<DbId>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0, max = MAX_BLOCK_SLOTS))]
    pub slot: i32,
    /// Ignored; blocks always attach to the parking lot being updated.
    pub parking_lot_id: Option<DbId>,
}

/// A time frame in a structural update. No id (or the nil id) means "create".
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeclaredTimeFrame {
    pub id: Option<DbId>,
    #[validate(range(min = 1))]
    pub duration: i32,
    #[validate(range(min = 0.0))]
    pub cost: f64,
    /// Ignored; time frames always attach to the parking lot being updated.
    pub parking_lot_id: Option<DbId>,
}

/// Structural update: new scalar fields plus the complete desired child sets.
///
/// Blocks and time frames absent from the declaration are removed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateParkingLotLayout {
    /// Must match the path id when present.
    pub parking_lot_id: Option<DbId>,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0))]
    pub long: f64,
    /// Expected `parking_lot.version`; the loaded version is used when absent.
    pub version: Option<i64>,
    #[validate(length(min = 1, message = "at least one block is required"), nested)]
    pub blocks: Vec<DeclaredBlock>,
    #[validate(length(min = 1, message = "at least one time frame is required"), nested)]
    pub time_frames: Vec<DeclaredTimeFrame>,
}
