//! Long-term booking record.
//!
//! Persisted next to the ticket created by the same booking request. There is
//! no foreign key back to that ticket; the record is queried on its own.

use parkline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `long_term_ticket` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LongTermTicket {
    pub id: DbId,
    pub vehicle_id: DbId,
    pub parking_lot_id: DbId,
    pub parking_slot_id: DbId,
    pub time_frame_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// `DAILY`, `CYCLE` or `CUSTOM`.
    pub booking_type: Option<String>,
    pub creator_id: Option<DbId>,
    pub updater_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
