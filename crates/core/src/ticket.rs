//! Ticket lifecycle rules.
//!
//! Defines the ticket states, the transitions callers may request, and the
//! transition table that decides the next state (or rejects the request).
//! Used by the ticket service before any row is written.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// Persisted `ticket.state` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketState {
    /// Booked, vehicle not yet arrived.
    New,
    /// Vehicle checked in.
    Ongoing,
    /// Vehicle checked out.
    Completed,
    /// Booking cancelled.
    Cancel,
    /// A ticket created by extending another ticket.
    Extend,
}

impl TicketState {
    pub const ALL: [TicketState; 5] = [
        TicketState::New,
        TicketState::Ongoing,
        TicketState::Completed,
        TicketState::Cancel,
        TicketState::Extend,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketState::New => "new",
            TicketState::Ongoing => "ongoing",
            TicketState::Completed => "completed",
            TicketState::Cancel => "cancel",
            TicketState::Extend => "extend",
        }
    }
}

impl fmt::Display for TicketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TicketState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown ticket state '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// A lifecycle operation requested against an existing ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    CheckIn,
    CheckOut,
    Cancel,
    /// Applied to the ticket being extended; its own state is kept.
    Extend,
    Review,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::CheckIn => "check_in",
            Transition::CheckOut => "check_out",
            Transition::Cancel => "cancel",
            Transition::Extend => "extend",
            Transition::Review => "review",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message returned when a review is attempted on a ticket that is not completed.
pub const NOT_COMPLETED_MESSAGE: &str = "ticket is not yet completed";

/// Look up `(current, transition)` in the transition table.
///
/// ```text
/// current \ op   check_in   check_out   cancel   extend    review
/// new            ongoing    -           cancel   new       -
/// ongoing        -          completed   cancel   ongoing   -
/// extend         ongoing    completed   cancel   extend    -
/// completed      -          -           -        -         completed
/// cancel         -          -           cancel   -         -
/// ```
///
/// `-` is rejected with [`CoreError::Conflict`].
pub fn next_state(current: TicketState, transition: Transition) -> Result<TicketState, CoreError> {
    use TicketState::{Cancel, Completed, Extend, New, Ongoing};

    let next = match (current, transition) {
        (New | Extend, Transition::CheckIn) => Some(Ongoing),
        (Ongoing | Extend, Transition::CheckOut) => Some(Completed),
        (New | Ongoing | Extend | Cancel, Transition::Cancel) => Some(Cancel),
        (New | Ongoing | Extend, Transition::Extend) => Some(current),
        (Completed, Transition::Review) => Some(Completed),
        _ => None,
    };

    match next {
        Some(state) => Ok(state),
        None if transition == Transition::Review => {
            Err(CoreError::Conflict(NOT_COMPLETED_MESSAGE.to_string()))
        }
        None => Err(CoreError::Conflict(format!(
            "Cannot {transition} a ticket in state '{current}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Procedure kinds
// ---------------------------------------------------------------------------

/// Attendant procedure requested through the procedure endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcedureKind {
    CheckIn,
    CheckOut,
}

impl From<ProcedureKind> for Transition {
    fn from(kind: ProcedureKind) -> Self {
        match kind {
            ProcedureKind::CheckIn => Transition::CheckIn,
            ProcedureKind::CheckOut => Transition::CheckOut,
        }
    }
}

// ---------------------------------------------------------------------------
// Booking types
// ---------------------------------------------------------------------------

/// Recurrence pattern of a long-term booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingType {
    Daily,
    Cycle,
    Custom,
}

impl BookingType {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingType::Daily => "DAILY",
            BookingType::Cycle => "CYCLE",
            BookingType::Custom => "CUSTOM",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
