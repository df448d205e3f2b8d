//! Repository for the `long_term_ticket` table.

use parkline_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::long_term_ticket::LongTermTicket;
use crate::models::ticket::CreateTicket;

/// Column list for the `long_term_ticket` table.
const COLUMNS: &str = "id, vehicle_id, parking_lot_id, parking_slot_id, time_frame_id, \
    start_time, end_time, booking_type, creator_id, updater_id, created_at, updated_at";

/// Provides persistence for long-term booking records.
pub struct LongTermTicketRepo;

impl LongTermTicketRepo {
    /// Insert a long-term record mirroring the booking window of `input`.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateTicket,
        actor_id: DbId,
    ) -> Result<LongTermTicket, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO long_term_ticket \
                (vehicle_id, parking_lot_id, parking_slot_id, time_frame_id, \
                 start_time, end_time, booking_type, creator_id, updater_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LongTermTicket>(&query)
            .bind(input.vehicle_id)
            .bind(input.parking_lot_id)
            .bind(input.parking_slot_id)
            .bind(input.time_frame_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.booking_type.map(|t| t.as_str()))
            .bind(actor_id)
            .fetch_one(executor)
            .await
    }

    /// List the long-term records of a parking lot, newest first.
    pub async fn list_by_parking_lot(
        pool: &PgPool,
        parking_lot_id: DbId,
    ) -> Result<Vec<LongTermTicket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM long_term_ticket \
             WHERE parking_lot_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, LongTermTicket>(&query)
            .bind(parking_lot_id)
            .fetch_all(pool)
            .await
    }
}
