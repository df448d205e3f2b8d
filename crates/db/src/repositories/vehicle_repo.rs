//! Repository for the `vehicle` table (read side only).

use parkline_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::vehicle::Vehicle;

/// Column list for the `vehicle` table.
const COLUMNS: &str = "id, user_id, vehicle_name, license_plate, vehicle_type, \
    created_at, updated_at, deleted_at";

/// Resolves vehicles referenced by tickets.
pub struct VehicleRepo;

impl VehicleRepo {
    /// Load vehicles by id, including soft-deleted rows.
    pub async fn find_by_ids_include_deleted<'e, E>(
        executor: E,
        ids: &[DbId],
    ) -> Result<Vec<Vehicle>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM vehicle WHERE id = ANY($1)");
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }
}
