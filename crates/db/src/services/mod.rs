//! Multi-table operations that must run in one transaction or need domain
//! rules from `parkline_core` applied around the queries.

pub mod layout;
pub mod ticket;

pub use layout::LayoutService;
pub use ticket::TicketService;
