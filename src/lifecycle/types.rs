// Core types for the participant lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::ParticipantStatus;

/// A single status change in a participant's audit trail.
///
/// Entries are append-only: once recorded they are never mutated or
/// removed, and insertion order equals chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: ParticipantStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Hold/unhold event. Kept separate from `StatusHistoryEntry` so that
/// pausing a file never perturbs the pipeline audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldEvent {
    pub on_hold: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Program participant: one household moving through the retrofit pipeline.
///
/// Profile fields are opaque to the lifecycle; only `status`, `on_hold`,
/// and the two history sequences are touched by transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub program: String,
    pub property_type: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_advisor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub status: ParticipantStatus,
    pub on_hold: bool,
    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,
    #[serde(default)]
    pub hold_history: Vec<HoldEvent>,
    pub created_at: DateTime<Utc>,
}

/// New-participant intake form. Everything else on `Participant` is
/// assigned by the directory at insert time.
#[derive(Debug, Clone, Default)]
pub struct ParticipantIntake {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub program: String,
    pub property_type: String,
    pub notes: String,
    pub priority: Option<Priority>,
}

impl Participant {
    /// Create a participant at the start of the pipeline with an empty
    /// audit trail.
    pub fn new(intake: ParticipantIntake) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            first_name: intake.first_name,
            last_name: intake.last_name,
            email: intake.email,
            phone: intake.phone,
            address: intake.address,
            city: intake.city,
            postal_code: intake.postal_code,
            program: intake.program,
            property_type: intake.property_type,
            notes: intake.notes,
            assigned_advisor: None,
            priority: intake.priority,
            status: ParticipantStatus::ReadyForBooking,
            on_hold: false,
            status_history: Vec::new(),
            hold_history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Most recent status change, if any transition has happened yet.
    pub fn last_history_entry(&self) -> Option<&StatusHistoryEntry> {
        self.status_history.last()
    }

    /// Total audit-trail length across both histories. Every mutating
    /// lifecycle operation grows this by exactly one, which makes it the
    /// compare-and-swap token for concurrent saves.
    pub fn audit_len(&self) -> usize {
        self.status_history.len() + self.hold_history.len()
    }
}
