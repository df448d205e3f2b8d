//! Parking slot entity model.
//!
//! Slots are derived from a block's declared capacity and are never created
//! directly by a caller.

use parkline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::block::Block;

/// A row from the `parking_slot` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ParkingSlot {
    pub id: DbId,
    pub block_id: DbId,
    /// Sequential display name (`"1"`, `"2"`, ...) unique within the block.
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A slot together with its (possibly tombstoned) block.
#[derive(Debug, Clone, Serialize)]
pub struct ParkingSlotWithBlock {
    #[serde(flatten)]
    pub slot: ParkingSlot,
    pub block: Option<Block>,
}
