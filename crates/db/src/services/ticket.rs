//! Ticket lifecycle: booking, extension, check-in/check-out, cancellation,
//! review and the enriched listings.
//!
//! Every state change is decided by [`next_state`] and persisted with a
//! version-guarded update, so two concurrent transitions on one ticket cannot
//! both succeed.

use std::collections::HashMap;

use chrono::Utc;
use parkline_core::error::CoreError;
use parkline_core::ticket::{next_state, ProcedureKind, Transition};
use parkline_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::parking_slot::ParkingSlotWithBlock;
use crate::models::ticket::{
    CompanyTicketListParams, CreateTicket, ExtendTicket, ExtendedTicket, ProcedureRequest,
    ReviewTicket, Ticket, TicketDetail, TicketDraft, TicketListParams, TicketWithExtends,
};
use crate::repositories::{
    BlockRepo, LongTermTicketRepo, ParkingLotRepo, ParkingSlotRepo, TicketExtendRepo, TicketRepo,
    VehicleRepo,
};

pub struct TicketService;

impl TicketService {
    /// Book a slot. Long-term bookings also record a `long_term_ticket`
    /// first; if that insert fails no ticket is created.
    pub async fn create(pool: &PgPool, input: &CreateTicket, actor_id: DbId) -> DbResult<Ticket> {
        if input.is_long_term {
            let long_term = LongTermTicketRepo::create(pool, input, actor_id).await?;
            tracing::debug!(long_term_ticket_id = %long_term.id, "Long-term booking recorded");
        }

        let ticket = TicketRepo::insert(pool, &TicketDraft::booking(input, actor_id)).await?;

        tracing::info!(
            ticket_id = %ticket.id,
            parking_slot_id = %ticket.parking_slot_id,
            is_long_term = input.is_long_term,
            "Ticket created",
        );
        Ok(ticket)
    }

    /// Extend a ticket: flag the original, create the sibling ticket in state
    /// `extend` and record the edge between them, all in one transaction.
    pub async fn extend(
        pool: &PgPool,
        input: &ExtendTicket,
        actor_id: DbId,
    ) -> DbResult<ExtendedTicket> {
        let mut tx = pool.begin().await?;

        let current = find_ticket(
            TicketRepo::find_by_id(&mut *tx, input.ticket_origin_id).await?,
            input.ticket_origin_id,
        )?;
        next_state(current.current_state()?, Transition::Extend)?;

        let original = TicketRepo::mark_extended(&mut *tx, current.id, current.version, actor_id)
            .await?
            .ok_or_else(|| CoreError::stale("Ticket", current.id))?;
        let extension =
            TicketRepo::insert(&mut *tx, &TicketDraft::extension(&original, input, actor_id))
                .await?;
        let edge = TicketExtendRepo::create(&mut *tx, original.id, extension.id).await?;

        tx.commit().await?;

        tracing::info!(
            ticket_id = %original.id,
            extension_id = %extension.id,
            "Ticket extended",
        );
        Ok(ExtendedTicket {
            original,
            extension,
            edge,
        })
    }

    /// Check a ticket in or out, stamping the entry or exit time.
    pub async fn procedure(
        pool: &PgPool,
        input: &ProcedureRequest,
        actor_id: DbId,
    ) -> DbResult<Ticket> {
        let current = find_ticket(
            TicketRepo::find_by_id(pool, input.ticket_id).await?,
            input.ticket_id,
        )?;
        let state = next_state(current.current_state()?, input.kind.into())?;

        let now = Utc::now();
        let (entry_time, exit_time) = match input.kind {
            ProcedureKind::CheckIn => (Some(now), None),
            ProcedureKind::CheckOut => (None, Some(now)),
        };

        let ticket = TicketRepo::update_state(
            pool,
            current.id,
            current.version,
            state,
            entry_time,
            exit_time,
            actor_id,
        )
        .await?
        .ok_or_else(|| CoreError::stale("Ticket", current.id))?;

        tracing::info!(ticket_id = %ticket.id, state = %state, "Ticket procedure applied");
        Ok(ticket)
    }

    /// Cancel a ticket. Cancelling a cancelled ticket is accepted.
    pub async fn cancel(pool: &PgPool, id: DbId, actor_id: DbId) -> DbResult<Ticket> {
        let current = find_ticket(TicketRepo::find_by_id(pool, id).await?, id)?;
        let state = next_state(current.current_state()?, Transition::Cancel)?;

        let ticket =
            TicketRepo::update_state(pool, id, current.version, state, None, None, actor_id)
                .await?
                .ok_or_else(|| CoreError::stale("Ticket", id))?;

        tracing::info!(ticket_id = %id, "Ticket cancelled");
        Ok(ticket)
    }

    /// Rate a completed ticket.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        input: &ReviewTicket,
        actor_id: DbId,
    ) -> DbResult<Ticket> {
        let current = find_ticket(TicketRepo::find_by_id(pool, id).await?, id)?;
        next_state(current.current_state()?, Transition::Review)?;

        let ticket = TicketRepo::set_review(
            pool,
            id,
            current.version,
            input.is_good_review,
            input.comment.as_deref(),
            actor_id,
        )
        .await?
        .ok_or_else(|| CoreError::stale("Ticket", id))?;

        tracing::info!(ticket_id = %id, is_good_review = input.is_good_review, "Ticket reviewed");
        Ok(ticket)
    }

    /// Load a ticket and the extension edges that originate from it.
    pub async fn get_with_extends(pool: &PgPool, id: DbId) -> DbResult<TicketWithExtends> {
        let ticket = find_ticket(TicketRepo::find_by_id(pool, id).await?, id)?;
        let ticket_extends = TicketExtendRepo::list_by_origin(pool, id).await?;
        Ok(TicketWithExtends {
            ticket,
            ticket_extends,
        })
    }

    /// Customer listing: tickets with vehicle, parking lot and slot resolved.
    pub async fn list(pool: &PgPool, params: &TicketListParams) -> DbResult<Vec<TicketDetail>> {
        let tickets = TicketRepo::list(pool, params).await?;
        Ok(enrich(pool, tickets).await?)
    }

    /// Merchant listing: every ticket of one parking lot, optionally by state.
    pub async fn list_for_company(
        pool: &PgPool,
        params: &CompanyTicketListParams,
    ) -> DbResult<Vec<TicketDetail>> {
        let tickets =
            TicketRepo::list_by_parking_lot(pool, params.parking_lot_id, params.state).await?;
        Ok(enrich(pool, tickets).await?)
    }
}

fn find_ticket(found: Option<Ticket>, id: DbId) -> Result<Ticket, CoreError> {
    found.ok_or(CoreError::NotFound {
        entity: "Ticket",
        id,
    })
}

fn unique_ids(ids: impl Iterator<Item = DbId>) -> Vec<DbId> {
    let mut ids: Vec<DbId> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Resolve the references of a page of tickets with one query per table.
/// Soft-deleted rows are included so historical tickets stay readable.
async fn enrich(pool: &PgPool, tickets: Vec<Ticket>) -> Result<Vec<TicketDetail>, sqlx::Error> {
    if tickets.is_empty() {
        return Ok(Vec::new());
    }

    let vehicle_ids = unique_ids(tickets.iter().map(|t| t.vehicle_id));
    let parking_lot_ids = unique_ids(tickets.iter().map(|t| t.parking_lot_id));
    let slot_ids = unique_ids(tickets.iter().map(|t| t.parking_slot_id));

    let vehicles: HashMap<DbId, _> = VehicleRepo::find_by_ids_include_deleted(pool, &vehicle_ids)
        .await?
        .into_iter()
        .map(|v| (v.id, v))
        .collect();
    let parking_lots: HashMap<DbId, _> =
        ParkingLotRepo::find_by_ids_include_deleted(pool, &parking_lot_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
    let slots = ParkingSlotRepo::find_by_ids_include_deleted(pool, &slot_ids).await?;

    let block_ids = unique_ids(slots.iter().map(|s| s.block_id));
    let blocks: HashMap<DbId, _> = BlockRepo::find_by_ids_include_deleted(pool, &block_ids)
        .await?
        .into_iter()
        .map(|b| (b.id, b))
        .collect();
    let slots: HashMap<DbId, _> = slots
        .into_iter()
        .map(|slot| {
            let block = blocks.get(&slot.block_id).cloned();
            (slot.id, ParkingSlotWithBlock { slot, block })
        })
        .collect();

    Ok(tickets
        .into_iter()
        .map(|ticket| TicketDetail {
            vehicle: vehicles.get(&ticket.vehicle_id).cloned(),
            parking_lot: parking_lots.get(&ticket.parking_lot_id).cloned(),
            parking_slot: slots.get(&ticket.parking_slot_id).cloned(),
            ticket,
        })
        .collect())
}
