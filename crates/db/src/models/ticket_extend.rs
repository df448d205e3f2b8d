//! Extension edge model.

use parkline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `ticket_extend` table: one hop of an extension chain.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TicketExtend {
    pub id: DbId,
    /// The ticket that was extended.
    pub ticket_id: DbId,
    /// The ticket created by the extension.
    pub ticket_extend_id: DbId,
    pub created_at: Timestamp,
}
