//! Block entity model and DTOs.
//!
//! A block is a physical sub-area of a parking lot with a declared slot
//! capacity. Its slots are provisioned once, when the block is created.

use parkline_core::slot::MAX_BLOCK_SLOTS;
use parkline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::parking_slot::ParkingSlot;

/// A row from the `block` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Block {
    pub id: DbId,
    pub parking_lot_id: DbId,
    pub code: String,
    pub description: String,
    /// Declared capacity at creation time.
    pub slot: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A block enriched with its parking slots.
#[derive(Debug, Clone, Serialize)]
pub struct BlockWithSlots {
    #[serde(flatten)]
    pub block: Block,
    pub parking_slots: Vec<ParkingSlot>,
}

/// DTO for creating a block under a parking lot.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBlock {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0, max = MAX_BLOCK_SLOTS))]
    pub slot: i32,
}

/// DTO for updating a block. Only non-`None` fields are applied.
///
/// Changing `slot` does not add or remove parking slots.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBlock {
    pub code: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, max = MAX_BLOCK_SLOTS))]
    pub slot: Option<i32>,
}
