//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` request DTOs for inserts and updates
//! - Enriched read structs for eager-loaded aggregates

pub mod block;
pub mod long_term_ticket;
pub mod parking_lot;
pub mod parking_slot;
pub mod ticket;
pub mod ticket_extend;
pub mod time_frame;
pub mod vehicle;
