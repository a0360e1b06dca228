// Participant statuses and the canonical pipeline order

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow status of a participant.
///
/// Nine of these form the ordered pipeline from intake to completion;
/// `OnHold` is kept for wire compatibility with exported records but is
/// never a pipeline position; holds live on the `on_hold` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    ReadyForBooking,
    Booked,
    AuditCompleted,
    ReadyForTechTeam,
    ReadyForContractorQuote,
    WorkordersSent,
    ReadyForFinalAudit,
    FinalAuditBooked,
    Completed,
    OnHold,
}

/// The canonical forward pipeline, in order. `OnHold` is deliberately absent.
pub const PIPELINE: [ParticipantStatus; 9] = [
    ParticipantStatus::ReadyForBooking,
    ParticipantStatus::Booked,
    ParticipantStatus::AuditCompleted,
    ParticipantStatus::ReadyForTechTeam,
    ParticipantStatus::ReadyForContractorQuote,
    ParticipantStatus::WorkordersSent,
    ParticipantStatus::ReadyForFinalAudit,
    ParticipantStatus::FinalAuditBooked,
    ParticipantStatus::Completed,
];

impl ParticipantStatus {
    /// Position in the pipeline, or `None` for off-pipeline statuses.
    pub fn pipeline_index(&self) -> Option<usize> {
        PIPELINE.iter().position(|s| s == self)
    }

    pub fn is_in_pipeline(&self) -> bool {
        self.pipeline_index().is_some()
    }

    /// Terminal: nothing to advance to.
    pub fn is_terminal(&self) -> bool {
        *self == ParticipantStatus::Completed
    }

    /// Wire name, matching the exported record format.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::ReadyForBooking => "READY_FOR_BOOKING",
            ParticipantStatus::Booked => "BOOKED",
            ParticipantStatus::AuditCompleted => "AUDIT_COMPLETED",
            ParticipantStatus::ReadyForTechTeam => "READY_FOR_TECH_TEAM",
            ParticipantStatus::ReadyForContractorQuote => "READY_FOR_CONTRACTOR_QUOTE",
            ParticipantStatus::WorkordersSent => "WORKORDERS_SENT",
            ParticipantStatus::ReadyForFinalAudit => "READY_FOR_FINAL_AUDIT",
            ParticipantStatus::FinalAuditBooked => "FINAL_AUDIT_BOOKED",
            ParticipantStatus::Completed => "COMPLETED",
            ParticipantStatus::OnHold => "ON_HOLD",
        }
    }

    /// Human-readable label for console tables.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace([' ', '-'], "_").as_str() {
            "READY_FOR_BOOKING" => Ok(ParticipantStatus::ReadyForBooking),
            "BOOKED" => Ok(ParticipantStatus::Booked),
            "AUDIT_COMPLETED" => Ok(ParticipantStatus::AuditCompleted),
            "READY_FOR_TECH_TEAM" => Ok(ParticipantStatus::ReadyForTechTeam),
            "READY_FOR_CONTRACTOR_QUOTE" => Ok(ParticipantStatus::ReadyForContractorQuote),
            "WORKORDERS_SENT" => Ok(ParticipantStatus::WorkordersSent),
            "READY_FOR_FINAL_AUDIT" => Ok(ParticipantStatus::ReadyForFinalAudit),
            "FINAL_AUDIT_BOOKED" => Ok(ParticipantStatus::FinalAuditBooked),
            "COMPLETED" => Ok(ParticipantStatus::Completed),
            "ON_HOLD" => Ok(ParticipantStatus::OnHold),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown participant status: {0}")]
pub struct UnknownStatus(pub String);
