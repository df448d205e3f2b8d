//! Parking lot layout: block creation with slot provisioning, and the
//! desired-state reconciler behind the structural update.

use std::collections::HashMap;

use parkline_core::error::CoreError;
use parkline_core::layout::partition;
use parkline_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::block::{BlockWithSlots, CreateBlock};
use crate::models::parking_lot::{ParkingLot, ParkingLotWithLayout, UpdateParkingLotLayout};
use crate::models::parking_slot::ParkingSlot;
use crate::models::time_frame::{CreateTimeFrame, TimeFrame};
use crate::repositories::{BlockRepo, ParkingLotRepo, ParkingSlotRepo, TimeFrameRepo};

pub struct LayoutService;

impl LayoutService {
    /// Create a block under a live parking lot and provision its slots in the
    /// same transaction.
    pub async fn create_block(
        pool: &PgPool,
        parking_lot_id: DbId,
        input: &CreateBlock,
    ) -> DbResult<BlockWithSlots> {
        let mut tx = pool.begin().await?;

        ensure_parking_lot(
            ParkingLotRepo::find_by_id(&mut *tx, parking_lot_id).await?,
            parking_lot_id,
        )?;

        let block = BlockRepo::insert(
            &mut *tx,
            parking_lot_id,
            &input.code,
            &input.description,
            input.slot,
        )
        .await?;
        let parking_slots = ParkingSlotRepo::provision(&mut *tx, &block).await?;

        tx.commit().await?;

        tracing::info!(
            block_id = %block.id,
            parking_lot_id = %parking_lot_id,
            slots = parking_slots.len(),
            "Block created",
        );
        Ok(BlockWithSlots {
            block,
            parking_slots,
        })
    }

    /// Load a live block with its live slots.
    pub async fn find_block(pool: &PgPool, id: DbId) -> DbResult<BlockWithSlots> {
        let block = BlockRepo::find_by_id(pool, id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Block", id })?;
        let parking_slots = ParkingSlotRepo::list_by_block(pool, id).await?;
        Ok(BlockWithSlots {
            block,
            parking_slots,
        })
    }

    /// Add a time frame to a live parking lot.
    pub async fn create_time_frame(
        pool: &PgPool,
        parking_lot_id: DbId,
        input: &CreateTimeFrame,
    ) -> DbResult<TimeFrame> {
        ensure_parking_lot(
            ParkingLotRepo::find_by_id(pool, parking_lot_id).await?,
            parking_lot_id,
        )?;
        let time_frame =
            TimeFrameRepo::insert(pool, parking_lot_id, input.duration, input.cost).await?;
        Ok(time_frame)
    }

    /// Load a live parking lot with its live blocks, slots and time frames.
    pub async fn find_with_layout(pool: &PgPool, id: DbId) -> DbResult<ParkingLotWithLayout> {
        let parking_lot = ensure_parking_lot(ParkingLotRepo::find_by_id(pool, id).await?, id)?;
        Ok(load_layout(pool, parking_lot).await?)
    }

    /// Make the parking lot's blocks and time frames match the declaration.
    ///
    /// Declared items with an id are updated in place; items without one are
    /// created (new blocks get their slots provisioned). Live children not
    /// declared are soft-deleted, and a removed block takes its slots with it.
    /// Scalar fields are applied last, guarded by the parking lot version.
    /// Any failure rolls the whole change back.
    pub async fn reconcile(
        pool: &PgPool,
        parking_lot_id: DbId,
        input: &UpdateParkingLotLayout,
        actor_id: DbId,
    ) -> DbResult<ParkingLotWithLayout> {
        if let Some(declared_id) = input.parking_lot_id {
            if declared_id != parking_lot_id {
                return Err(CoreError::Validation(format!(
                    "parking_lot_id {declared_id} does not match the parking lot being updated"
                ))
                .into());
            }
        }

        let current = ensure_parking_lot(
            ParkingLotRepo::find_by_id(pool, parking_lot_id).await?,
            parking_lot_id,
        )?;
        let expected_version = input.version.unwrap_or(current.version);

        let blocks = partition(input.blocks.clone(), |b| b.id);
        let time_frames = partition(input.time_frames.clone(), |t| t.id);

        let mut tx = pool.begin().await?;

        let removed_time_frames =
            TimeFrameRepo::soft_delete_not_in(&mut *tx, parking_lot_id, &time_frames.kept_ids)
                .await?;
        let removed_blocks =
            BlockRepo::soft_delete_not_in(&mut *tx, parking_lot_id, &blocks.kept_ids).await?;
        let removed_slots = if removed_blocks.is_empty() {
            0
        } else {
            ParkingSlotRepo::soft_delete_by_blocks(&mut *tx, &removed_blocks).await?
        };

        for (id, declared) in &time_frames.kept {
            let found = TimeFrameRepo::update_declared(
                &mut *tx,
                parking_lot_id,
                *id,
                declared.duration,
                declared.cost,
            )
            .await?;
            if !found {
                return Err(CoreError::NotFound {
                    entity: "TimeFrame",
                    id: *id,
                }
                .into());
            }
        }

        for (id, declared) in &blocks.kept {
            let found = BlockRepo::update_declared(
                &mut *tx,
                parking_lot_id,
                *id,
                &declared.code,
                &declared.description,
                declared.slot,
            )
            .await?;
            if !found {
                return Err(CoreError::NotFound {
                    entity: "Block",
                    id: *id,
                }
                .into());
            }
        }

        for declared in &time_frames.new_items {
            TimeFrameRepo::insert(&mut *tx, parking_lot_id, declared.duration, declared.cost)
                .await?;
        }

        let mut provisioned = 0;
        for declared in &blocks.new_items {
            let block = BlockRepo::insert(
                &mut *tx,
                parking_lot_id,
                &declared.code,
                &declared.description,
                declared.slot,
            )
            .await?;
            provisioned += ParkingSlotRepo::provision(&mut *tx, &block).await?.len();
        }

        let updated = ParkingLotRepo::update_guarded(
            &mut *tx,
            parking_lot_id,
            expected_version,
            input,
            actor_id,
        )
        .await?
        .ok_or_else(|| CoreError::stale("ParkingLot", parking_lot_id))?;

        tx.commit().await?;

        tracing::info!(
            parking_lot_id = %parking_lot_id,
            version = updated.version,
            blocks_kept = blocks.kept.len(),
            blocks_created = blocks.new_items.len(),
            blocks_removed = removed_blocks.len(),
            slots_provisioned = provisioned,
            slots_removed = removed_slots,
            time_frames_kept = time_frames.kept.len(),
            time_frames_created = time_frames.new_items.len(),
            time_frames_removed = removed_time_frames.len(),
            "Parking lot layout reconciled",
        );

        Ok(load_layout(pool, updated).await?)
    }
}

fn ensure_parking_lot(found: Option<ParkingLot>, id: DbId) -> Result<ParkingLot, CoreError> {
    found.ok_or(CoreError::NotFound {
        entity: "ParkingLot",
        id,
    })
}

async fn load_layout(
    pool: &PgPool,
    parking_lot: ParkingLot,
) -> Result<ParkingLotWithLayout, sqlx::Error> {
    let blocks = BlockRepo::list_by_parking_lot(pool, parking_lot.id).await?;
    let block_ids: Vec<DbId> = blocks.iter().map(|b| b.id).collect();
    let slots = ParkingSlotRepo::list_by_blocks(pool, &block_ids).await?;
    let time_frames = TimeFrameRepo::list_by_parking_lot(pool, parking_lot.id).await?;

    let mut slots_by_block: HashMap<DbId, Vec<ParkingSlot>> = HashMap::new();
    for slot in slots {
        slots_by_block.entry(slot.block_id).or_default().push(slot);
    }

    let blocks = blocks
        .into_iter()
        .map(|block| BlockWithSlots {
            parking_slots: slots_by_block.remove(&block.id).unwrap_or_default(),
            block,
        })
        .collect();

    Ok(ParkingLotWithLayout {
        parking_lot,
        blocks,
        time_frames,
    })
}
