//! Repository for the `parking_slot` table, including slot provisioning.

use parkline_core::slot::slot_names;
use parkline_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::block::Block;
use crate::models::parking_slot::ParkingSlot;

/// Column list for the `parking_slot` table.
const COLUMNS: &str = "id, block_id, name, created_at, updated_at, deleted_at";

/// Slot names are numeric strings; sort them numerically.
const ORDER_BY_NAME: &str = "ORDER BY length(name), name";

/// Provides slot provisioning and read access to parking slots.
pub struct ParkingSlotRepo;

impl ParkingSlotRepo {
    /// Create the slots of a freshly inserted block: `block.slot` rows named
    /// `"1"` through `"N"`, all bound to the block.
    ///
    /// Run it on the same transaction that inserted the block. A capacity
    /// below 1 provisions nothing. Never call it for an existing block; slot
    /// sets are not reconciled after creation.
    pub async fn provision<'e, E>(
        executor: E,
        block: &Block,
    ) -> Result<Vec<ParkingSlot>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let names = slot_names(block.slot);
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "INSERT INTO parking_slot (block_id, name) \
             SELECT $1, t.name FROM UNNEST($2::text[]) WITH ORDINALITY AS t(name, ord) \
             ORDER BY t.ord \
             RETURNING {COLUMNS}"
        );
        let mut slots = sqlx::query_as::<_, ParkingSlot>(&query)
            .bind(block.id)
            .bind(&names)
            .fetch_all(executor)
            .await?;
        slots.sort_by(|a, b| a.name.len().cmp(&b.name.len()).then_with(|| a.name.cmp(&b.name)));

        tracing::debug!(block_id = %block.id, count = slots.len(), "Provisioned parking slots");
        Ok(slots)
    }

    /// List the live slots of a block, numerically by name.
    pub async fn list_by_block<'e, E>(
        executor: E,
        block_id: DbId,
    ) -> Result<Vec<ParkingSlot>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM parking_slot \
             WHERE block_id = $1 AND deleted_at IS NULL \
             {ORDER_BY_NAME}"
        );
        sqlx::query_as::<_, ParkingSlot>(&query)
            .bind(block_id)
            .fetch_all(executor)
            .await
    }

    /// List the live slots of several blocks, grouped by block then by name.
    pub async fn list_by_blocks<'e, E>(
        executor: E,
        block_ids: &[DbId],
    ) -> Result<Vec<ParkingSlot>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM parking_slot \
             WHERE block_id = ANY($1) AND deleted_at IS NULL \
             ORDER BY block_id, length(name), name"
        );
        sqlx::query_as::<_, ParkingSlot>(&query)
            .bind(block_ids)
            .fetch_all(executor)
            .await
    }

    /// Load slots by id, including soft-deleted rows.
    pub async fn find_by_ids_include_deleted<'e, E>(
        executor: E,
        ids: &[DbId],
    ) -> Result<Vec<ParkingSlot>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM parking_slot WHERE id = ANY($1)");
        sqlx::query_as::<_, ParkingSlot>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    /// Soft-delete every live slot belonging to the given blocks.
    pub async fn soft_delete_by_blocks<'e, E>(
        executor: E,
        block_ids: &[DbId],
    ) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE parking_slot SET deleted_at = NOW() \
             WHERE block_id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(block_ids)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
