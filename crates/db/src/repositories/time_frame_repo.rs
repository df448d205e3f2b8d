//! Repository for the `time_frame` table.

use parkline_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::time_frame::TimeFrame;

/// Column list for the `time_frame` table.
const COLUMNS: &str = "id, parking_lot_id, duration, cost, created_at, updated_at, deleted_at";

/// Provides CRUD operations for time frames.
pub struct TimeFrameRepo;

impl TimeFrameRepo {
    /// Insert a time frame under a parking lot, returning the created row.
    pub async fn insert<'e, E>(
        executor: E,
        parking_lot_id: DbId,
        duration: i32,
        cost: f64,
    ) -> Result<TimeFrame, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO time_frame (parking_lot_id, duration, cost) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeFrame>(&query)
            .bind(parking_lot_id)
            .bind(duration)
            .bind(cost)
            .fetch_one(executor)
            .await
    }

    /// List the live time frames of a parking lot, shortest first.
    pub async fn list_by_parking_lot<'e, E>(
        executor: E,
        parking_lot_id: DbId,
    ) -> Result<Vec<TimeFrame>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM time_frame \
             WHERE parking_lot_id = $1 AND deleted_at IS NULL \
             ORDER BY duration, created_at"
        );
        sqlx::query_as::<_, TimeFrame>(&query)
            .bind(parking_lot_id)
            .fetch_all(executor)
            .await
    }

    /// Overwrite the declared fields of a kept time frame, scoped to its
    /// parking lot.
    ///
    /// Returns `false` if the time frame is not a live child of `parking_lot_id`.
    pub async fn update_declared<'e, E>(
        executor: E,
        parking_lot_id: DbId,
        id: DbId,
        duration: i32,
        cost: f64,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE time_frame SET duration = $3, cost = $4, updated_at = NOW() \
             WHERE id = $1 AND parking_lot_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(parking_lot_id)
        .bind(duration)
        .bind(cost)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete every live time frame of the parking lot whose id is not
    /// in `kept_ids`. Returns the ids that were removed.
    pub async fn soft_delete_not_in<'e, E>(
        executor: E,
        parking_lot_id: DbId,
        kept_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "UPDATE time_frame SET deleted_at = NOW() \
             WHERE parking_lot_id = $1 AND deleted_at IS NULL AND id <> ALL($2) \
             RETURNING id",
        )
        .bind(parking_lot_id)
        .bind(kept_ids)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
