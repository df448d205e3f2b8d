//! Repository for the `ticket` table.
//!
//! Every mutation is guarded by the row's `version`: the update only applies
//! when the caller's expected version still matches, and bumps it.

use parkline_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use parkline_core::ticket::TicketState;
use parkline_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::ticket::{Ticket, TicketDraft, TicketListParams};

/// Column list for the `ticket` table.
const COLUMNS: &str = "id, user_id, vehicle_id, parking_lot_id, parking_slot_id, time_frame_id, \
    state, start_time, end_time, entry_time, exit_time, total, is_extend, is_good_review, \
    comment, version, creator_id, updater_id, created_at, updated_at";

/// Provides persistence for tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a ticket from a draft, stamping creator and updater.
    pub async fn insert<'e, E>(executor: E, draft: &TicketDraft) -> Result<Ticket, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO ticket \
                (user_id, vehicle_id, parking_lot_id, parking_slot_id, time_frame_id, \
                 state, start_time, end_time, total, creator_id, updater_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(draft.user_id)
            .bind(draft.vehicle_id)
            .bind(draft.parking_lot_id)
            .bind(draft.parking_slot_id)
            .bind(draft.time_frame_id)
            .bind(draft.state.as_str())
            .bind(draft.start_time)
            .bind(draft.end_time)
            .bind(draft.total)
            .bind(draft.actor_id)
            .fetch_one(executor)
            .await
    }

    /// Find a ticket by id.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Ticket>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM ticket WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List tickets newest first, filtered by user, parking lot and state.
    pub async fn list(
        pool: &PgPool,
        params: &TicketListParams,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ticket \
             WHERE ($1::uuid IS NULL OR user_id = $1) \
               AND ($2::uuid IS NULL OR parking_lot_id = $2) \
               AND ($3::text IS NULL OR state = $3) \
             ORDER BY created_at DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(params.user_id)
            .bind(params.parking_lot_id)
            .bind(params.state.map(TicketState::as_str))
            .bind(clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// List every ticket of a parking lot newest first, optionally by state.
    pub async fn list_by_parking_lot(
        pool: &PgPool,
        parking_lot_id: DbId,
        state: Option<TicketState>,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ticket \
             WHERE parking_lot_id = $1 AND ($2::text IS NULL OR state = $2) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(parking_lot_id)
            .bind(state.map(TicketState::as_str))
            .fetch_all(pool)
            .await
    }

    /// Move a ticket to `state`, stamping `entry_time` / `exit_time` when
    /// given (existing stamps are kept otherwise).
    ///
    /// Returns `None` if the ticket is gone or its version moved.
    pub async fn update_state<'e, E>(
        executor: E,
        id: DbId,
        expected_version: i64,
        state: TicketState,
        entry_time: Option<Timestamp>,
        exit_time: Option<Timestamp>,
        actor_id: DbId,
    ) -> Result<Option<Ticket>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE ticket SET \
                state = $3, \
                entry_time = COALESCE($4, entry_time), \
                exit_time = COALESCE($5, exit_time), \
                updater_id = $6, version = version + 1, updated_at = NOW() \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(state.as_str())
            .bind(entry_time)
            .bind(exit_time)
            .bind(actor_id)
            .fetch_optional(executor)
            .await
    }

    /// Flag a ticket as extended.
    ///
    /// Returns `None` if the ticket is gone or its version moved.
    pub async fn mark_extended<'e, E>(
        executor: E,
        id: DbId,
        expected_version: i64,
        actor_id: DbId,
    ) -> Result<Option<Ticket>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE ticket SET \
                is_extend = true, updater_id = $3, version = version + 1, updated_at = NOW() \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(actor_id)
            .fetch_optional(executor)
            .await
    }

    /// Record a review. The comment is only replaced when one is given.
    ///
    /// Returns `None` if the ticket is gone or its version moved.
    pub async fn set_review<'e, E>(
        executor: E,
        id: DbId,
        expected_version: i64,
        is_good_review: bool,
        comment: Option<&str>,
        actor_id: DbId,
    ) -> Result<Option<Ticket>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE ticket SET \
                is_good_review = $3, comment = COALESCE($4, comment), \
                updater_id = $5, version = version + 1, updated_at = NOW() \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(is_good_review)
            .bind(comment)
            .bind(actor_id)
            .fetch_optional(executor)
            .await
    }
}
