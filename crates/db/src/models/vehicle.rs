//! Vehicle entity model.
//!
//! Vehicles are managed outside the booking core; tickets only reference
//! them and resolve them for listings.

use parkline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `vehicle` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vehicle {
    pub id: DbId,
    pub user_id: DbId,
    pub vehicle_name: String,
    pub license_plate: String,
    pub vehicle_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
