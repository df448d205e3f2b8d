//! Ticket entity model and DTOs.
//!
//! A ticket is one reservation of a parking slot for a vehicle. State
//! changes go through `services::ticket`, which consults the transition
//! table in `parkline_core::ticket`.

use parkline_core::error::CoreError;
use parkline_core::ticket::{BookingType, ProcedureKind, TicketState};
use parkline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use super::parking_lot::ParkingLot;
use super::parking_slot::ParkingSlotWithBlock;
use super::ticket_extend::TicketExtend;
use super::vehicle::Vehicle;

/// A row from the `ticket` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ticket {
    pub id: DbId,
    pub user_id: DbId,
    pub vehicle_id: DbId,
    pub parking_lot_id: DbId,
    pub parking_slot_id: DbId,
    pub time_frame_id: DbId,
    pub state: String,
    /// Requested window.
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// Actual arrival, stamped on check-in.
    pub entry_time: Option<Timestamp>,
    /// Actual departure, stamped on check-out.
    pub exit_time: Option<Timestamp>,
    pub total: f64,
    /// Set once the ticket has been extended at least once.
    pub is_extend: bool,
    pub is_good_review: Option<bool>,
    pub comment: Option<String>,
    /// Optimistic-concurrency token, bumped on every mutation.
    pub version: i64,
    pub creator_id: Option<DbId>,
    pub updater_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Ticket {
    /// Parse the persisted state string.
    pub fn current_state(&self) -> Result<TicketState, CoreError> {
        self.state.parse()
    }
}

fn validate_booking_window(
    start_time: &Timestamp,
    end_time: &Timestamp,
) -> Result<(), ValidationError> {
    if end_time <= start_time {
        return Err(ValidationError::new("end_time_before_start_time")
            .with_message("end_time must be after start_time".into()));
    }
    Ok(())
}

fn validate_create_window(input: &CreateTicket) -> Result<(), ValidationError> {
    validate_booking_window(&input.start_time, &input.end_time)
}

fn validate_extend_window(input: &ExtendTicket) -> Result<(), ValidationError> {
    validate_booking_window(&input.start_time, &input.end_time)
}

/// Booking request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_create_window"))]
pub struct CreateTicket {
    pub user_id: DbId,
    pub vehicle_id: DbId,
    pub parking_lot_id: DbId,
    pub parking_slot_id: DbId,
    pub time_frame_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// Computed by the caller from the chosen time frame.
    #[validate(range(min = 0.0))]
    pub total: f64,
    #[serde(default)]
    pub is_long_term: bool,
    #[serde(rename = "type")]
    pub booking_type: Option<BookingType>,
}

/// Extension request: a new window and time frame for an existing ticket.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_extend_window"))]
pub struct ExtendTicket {
    pub ticket_origin_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub time_frame_id: DbId,
    #[validate(range(min = 0.0))]
    pub total: f64,
}

/// Column values for a ticket about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDraft {
    pub user_id: DbId,
    pub vehicle_id: DbId,
    pub parking_lot_id: DbId,
    pub parking_slot_id: DbId,
    pub time_frame_id: DbId,
    pub state: TicketState,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub total: f64,
    pub actor_id: DbId,
}

impl TicketDraft {
    /// A fresh booking in state `new`.
    pub fn booking(input: &CreateTicket, actor_id: DbId) -> Self {
        Self {
            user_id: input.user_id,
            vehicle_id: input.vehicle_id,
            parking_lot_id: input.parking_lot_id,
            parking_slot_id: input.parking_slot_id,
            time_frame_id: input.time_frame_id,
            state: TicketState::New,
            start_time: input.start_time,
            end_time: input.end_time,
            total: input.total,
            actor_id,
        }
    }

    /// The sibling ticket created by extending `original`: same user,
    /// vehicle, parking lot and slot; the request's window, time frame and
    /// total; state `extend`.
    pub fn extension(original: &Ticket, input: &ExtendTicket, actor_id: DbId) -> Self {
        Self {
            user_id: original.user_id,
            vehicle_id: original.vehicle_id,
            parking_lot_id: original.parking_lot_id,
            parking_slot_id: original.parking_slot_id,
            time_frame_id: input.time_frame_id,
            state: TicketState::Extend,
            start_time: input.start_time,
            end_time: input.end_time,
            total: input.total,
            actor_id,
        }
    }
}

/// Attendant check-in / check-out request.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcedureRequest {
    pub ticket_id: DbId,
    #[serde(rename = "type")]
    pub kind: ProcedureKind,
}

/// Review of a completed ticket.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewTicket {
    pub is_good_review: bool,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

/// Filters for the customer-facing ticket listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketListParams {
    pub user_id: Option<DbId>,
    pub parking_lot_id: Option<DbId>,
    pub state: Option<TicketState>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Filters for the merchant-facing ticket listing of one parking lot.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyTicketListParams {
    pub parking_lot_id: DbId,
    pub state: Option<TicketState>,
}

/// A ticket with its vehicle, parking lot and slot (plus the slot's block)
/// resolved, tombstoned rows included.
#[derive(Debug, Clone, Serialize)]
pub struct TicketDetail {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub vehicle: Option<Vehicle>,
    pub parking_lot: Option<ParkingLot>,
    pub parking_slot: Option<ParkingSlotWithBlock>,
}

/// A ticket with the extension edges that originate from it (one hop).
#[derive(Debug, Clone, Serialize)]
pub struct TicketWithExtends {
    pub ticket: Ticket,
    pub ticket_extends: Vec<TicketExtend>,
}

/// Result of extending a ticket.
#[derive(Debug, Clone, Serialize)]
pub struct ExtendedTicket {
    /// The original ticket, now flagged `is_extend`.
    pub original: Ticket,
    /// The new ticket in state `extend`.
    pub extension: Ticket,
    pub edge: TicketExtend,
}
