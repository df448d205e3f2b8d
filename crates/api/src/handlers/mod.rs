pub mod block;
pub mod parking_lot;
pub mod ticket;
pub mod time_frame;
