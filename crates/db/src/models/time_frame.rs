//! Time frame entity model and DTOs.
//!
//! A time frame is a duration/price option a parking lot offers at booking
//! time.

use parkline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `time_frame` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeFrame {
    pub id: DbId,
    pub parking_lot_id: DbId,
    /// Duration in minutes.
    pub duration: i32,
    pub cost: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for creating a time frame under a parking lot.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTimeFrame {
    #[validate(range(min = 1))]
    pub duration: i32,
    #[validate(range(min = 0.0))]
    pub cost: f64,
}
