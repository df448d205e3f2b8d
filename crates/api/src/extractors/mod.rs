//! Custom request extractors.

pub mod actor;

pub use actor::ActorId;
