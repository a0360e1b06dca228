// Participant Lifecycle Module - Pipeline State Machine
//
// Owns the ordered workflow states, validates and applies transitions,
// and maintains the append-only status history per participant.

pub mod state_machine;
pub mod status;
pub mod types;

pub use state_machine::{InvalidStateError, ParticipantLifecycle};
pub use status::{ParticipantStatus, UnknownStatus, PIPELINE};
pub use types::{HoldEvent, Participant, ParticipantIntake, Priority, StatusHistoryEntry};
