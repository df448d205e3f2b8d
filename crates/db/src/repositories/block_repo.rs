//! Repository for the `block` table.

use parkline_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::block::{Block, UpdateBlock};

/// Column list for the `block` table.
const COLUMNS: &str =
    "id, parking_lot_id, code, description, slot, created_at, updated_at, deleted_at";

/// Provides CRUD operations for blocks.
///
/// Inserting a block does not provision its slots; callers pair
/// [`BlockRepo::insert`] with `ParkingSlotRepo::provision` in one transaction
/// (see `services::layout::LayoutService::create_block`).
pub struct BlockRepo;

impl BlockRepo {
    /// Insert a block row, returning it.
    pub async fn insert<'e, E>(
        executor: E,
        parking_lot_id: DbId,
        code: &str,
        description: &str,
        slot: i32,
    ) -> Result<Block, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO block (parking_lot_id, code, description, slot) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(parking_lot_id)
            .bind(code)
            .bind(description)
            .bind(slot)
            .fetch_one(executor)
            .await
    }

    /// Find a live block by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Block>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM block WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Block>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load blocks by id, including soft-deleted rows.
    pub async fn find_by_ids_include_deleted<'e, E>(
        executor: E,
        ids: &[DbId],
    ) -> Result<Vec<Block>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM block WHERE id = ANY($1)");
        sqlx::query_as::<_, Block>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    /// List the live blocks of a parking lot in creation order.
    pub async fn list_by_parking_lot<'e, E>(
        executor: E,
        parking_lot_id: DbId,
    ) -> Result<Vec<Block>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM block \
             WHERE parking_lot_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at, code"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(parking_lot_id)
            .fetch_all(executor)
            .await
    }

    /// Update a block. Only non-`None` fields are applied; slots are untouched.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlock,
    ) -> Result<Option<Block>, sqlx::Error> {
        let query = format!(
            "UPDATE block SET \
                code = COALESCE($2, code), \
                description = COALESCE($3, description), \
                slot = COALESCE($4, slot), \
                updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.description)
            .bind(input.slot)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the declared fields of a kept block, scoped to its parking lot.
    ///
    /// Returns `false` if the block is not a live child of `parking_lot_id`.
    pub async fn update_declared<'e, E>(
        executor: E,
        parking_lot_id: DbId,
        id: DbId,
        code: &str,
        description: &str,
        slot: i32,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE block SET code = $3, description = $4, slot = $5, updated_at = NOW() \
             WHERE id = $1 AND parking_lot_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(parking_lot_id)
        .bind(code)
        .bind(description)
        .bind(slot)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete every live block of the parking lot whose id is not in
    /// `kept_ids`. Returns the ids that were removed.
    pub async fn soft_delete_not_in<'e, E>(
        executor: E,
        parking_lot_id: DbId,
        kept_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "UPDATE block SET deleted_at = NOW() \
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
