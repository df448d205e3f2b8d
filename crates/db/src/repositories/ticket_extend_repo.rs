//! Repository for the `ticket_extend` table.

use parkline_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::ticket_extend::TicketExtend;

/// Column list for the `ticket_extend` table.
const COLUMNS: &str = "id, ticket_id, ticket_extend_id, created_at";

/// Provides persistence for extension edges.
pub struct TicketExtendRepo;

impl TicketExtendRepo {
    /// Record that `ticket_extend_id` extends `ticket_id`.
    pub async fn create<'e, E>(
        executor: E,
        ticket_id: DbId,
        ticket_extend_id: DbId,
    ) -> Result<TicketExtend, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO ticket_extend (ticket_id, ticket_extend_id) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TicketExtend>(&query)
            .bind(ticket_id)
            .bind(ticket_extend_id)
            .fetch_one(executor)
            .await
    }

    /// List the edges originating from a ticket, oldest first.
    pub async fn list_by_origin<'e, E>(
        executor: E,
        ticket_id: DbId,
    ) -> Result<Vec<TicketExtend>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM ticket_extend WHERE ticket_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, TicketExtend>(&query)
            .bind(ticket_id)
            .fetch_all(executor)
            .await
    }
}
