//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Methods that take part in a transaction accept any `PgExecutor`, so they
//! run equally against `&PgPool` or `&mut *tx`.

pub mod block_repo;
pub mod long_term_ticket_repo;
pub mod parking_lot_repo;
pub mod parking_slot_repo;
pub mod ticket_extend_repo;
pub mod ticket_repo;
pub mod time_frame_repo;
pub mod vehicle_repo;

pub use block_repo::BlockRepo;
pub use long_term_ticket_repo::LongTermTicketRepo;
pub use parking_lot_repo::ParkingLotRepo;
pub use parking_slot_repo::ParkingSlotRepo;
pub use ticket_extend_repo::TicketExtendRepo;
pub use ticket_repo::TicketRepo;
pub use time_frame_repo::TimeFrameRepo;
pub use vehicle_repo::VehicleRepo;
