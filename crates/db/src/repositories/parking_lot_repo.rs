//! Repository for the `parking_lot` table.

use parkline_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use parkline_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::parking_lot::{
    CreateParkingLot, ParkingLot, ParkingLotListParams, UpdateParkingLotLayout, STATUS_PENDING,
};

/// Column list for the `parking_lot` table.
const COLUMNS: &str = "id, company_id, name, description, address, start_time, end_time, \
    lat, lng, status, version, creator_id, updater_id, created_at, updated_at, deleted_at";

/// Provides CRUD operations for parking lots. Layout changes go through
/// `services::layout`.
pub struct ParkingLotRepo;

impl ParkingLotRepo {
    /// Insert a new parking lot in `pending` status, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateParkingLot,
        actor_id: DbId,
    ) -> Result<ParkingLot, sqlx::Error> {
        let query = format!(
            "INSERT INTO parking_lot \
                (company_id, name, description, address, start_time, end_time, lat, lng, \
                 status, creator_id, updater_id) \
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), $5, $6, \
                 COALESCE($7, 0), COALESCE($8, 0), $9, $10, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParkingLot>(&query)
            .bind(input.company_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.address)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.lat)
            .bind(input.long)
            .bind(STATUS_PENDING)
            .bind(actor_id)
            .fetch_one(pool)
            .await
    }

    /// Find a live parking lot by id. Soft-deleted rows are excluded.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<ParkingLot>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query =
            format!("SELECT {COLUMNS} FROM parking_lot WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, ParkingLot>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Load parking lots by id, including soft-deleted rows.
    pub async fn find_by_ids_include_deleted<'e, E>(
        executor: E,
        ids: &[DbId],
    ) -> Result<Vec<ParkingLot>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM parking_lot WHERE id = ANY($1)");
        sqlx::query_as::<_, ParkingLot>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    /// List live parking lots, newest first, optionally filtered by company
    /// and case-insensitive name prefix.
    pub async fn list(
        pool: &PgPool,
        params: &ParkingLotListParams,
    ) -> Result<Vec<ParkingLot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM parking_lot \
             WHERE deleted_at IS NULL \
               AND ($1::uuid IS NULL OR company_id = $1) \
               AND ($2::text IS NULL OR name ILIKE $2 || '%') \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ParkingLot>(&query)
            .bind(params.company_id)
            .bind(&params.name)
            .bind(clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Apply the scalar fields of a structural update if the row is still at
    /// `expected_version`, bumping the version.
    ///
    /// Returns `None` when the row is gone or its version moved.
    pub async fn update_guarded<'e, E>(
        executor: E,
        id: DbId,
        expected_version: i64,
        input: &UpdateParkingLotLayout,
        actor_id: DbId,
    ) -> Result<Option<ParkingLot>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE parking_lot SET \
                name = $3, description = $4, address = $5, \
                start_time = $6, end_time = $7, lat = $8, lng = $9, \
                updater_id = $10, version = version + 1, updated_at = NOW() \
             WHERE id = $1 AND version = $2 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParkingLot>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.address)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.lat)
            .bind(input.long)
            .bind(actor_id)
            .fetch_optional(executor)
            .await
    }

    /// Soft-delete a parking lot. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE parking_lot SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
