//! Domain rules for parking lot layouts and ticket lifecycles.
//!
//! Contains no I/O; the `parkline-db` crate applies these rules inside
//! database transactions.

pub mod error;
pub mod layout;
pub mod pagination;
pub mod slot;
pub mod ticket;
pub mod types;
