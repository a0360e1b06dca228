// Audit booking desk
//
// Validates a booking form, records the visit, and moves the
// participant one pipeline position (intake booking or final-audit
// booking). No calendar or availability logic lives here.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::coordinator::{CoordinatorError, ParticipantCoordinator};
use crate::lifecycle::{InvalidStateError, Participant, ParticipantStatus};
use crate::roster::{EnergyAdvisor, Roster, TeamMemberStatus};
use crate::validation::FieldValidator;

/// The fixed visit slots offered by the booking screens.
pub const TIME_SLOTS: [&str; 6] = [
    "09:00 AM",
    "10:00 AM",
    "11:00 AM",
    "01:00 PM",
    "02:00 PM",
    "03:00 PM",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisitKind {
    InitialAudit,
    FinalAudit,
}

impl VisitKind {
    /// Pipeline position a participant must hold to book this visit.
    pub fn required_status(&self) -> ParticipantStatus {
        match self {
            VisitKind::InitialAudit => ParticipantStatus::ReadyForBooking,
            VisitKind::FinalAudit => ParticipantStatus::ReadyForFinalAudit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub participant_id: String,
    pub advisor_id: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub visit: VisitKind,
    pub notes: Option<String>,
}

/// A confirmed audit visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub participant_id: String,
    pub advisor_id: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub visit: VisitKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error(transparent)]
    Invalid(#[from] crate::validation::ValidationError),
    #[error("time slot {slot:?} is not offered")]
    UnknownTimeSlot { slot: String },
    #[error("advisor {id} not found")]
    UnknownAdvisor { id: String },
    #[error("advisor {name} is inactive and cannot take bookings")]
    InactiveAdvisor { name: String },
    #[error("participant is at {actual}, a {visit:?} booking requires {required}")]
    WrongStage {
        visit: VisitKind,
        required: ParticipantStatus,
        actual: ParticipantStatus,
    },
    #[error("participant file is on hold")]
    OnHold,
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),
}

/// Takes booking forms against the advisor roster and the participant
/// coordinator.
pub struct BookingDesk {
    coordinator: Arc<ParticipantCoordinator>,
    advisors: Arc<Roster<EnergyAdvisor>>,
    bookings: RwLock<Vec<Booking>>,
}

impl BookingDesk {
    pub fn new(
        coordinator: Arc<ParticipantCoordinator>,
        advisors: Arc<Roster<EnergyAdvisor>>,
    ) -> Self {
        Self {
            coordinator,
            advisors,
            bookings: RwLock::new(Vec::new()),
        }
    }

    pub fn with_bookings(
        coordinator: Arc<ParticipantCoordinator>,
        advisors: Arc<Roster<EnergyAdvisor>>,
        bookings: Vec<Booking>,
    ) -> Self {
        Self {
            coordinator,
            advisors,
            bookings: RwLock::new(bookings),
        }
    }

    /// Validate the form, record the visit, and advance the participant
    /// into the booked state for that visit kind.
    pub async fn book(
        &self,
        request: BookingRequest,
        actor: Option<&str>,
    ) -> Result<(Booking, Participant), BookingError> {
        let mut v = FieldValidator::new();
        v.require("advisor", &request.advisor_id)
            .require("time slot", &request.time_slot);
        v.finish()?;

        if !TIME_SLOTS.contains(&request.time_slot.as_str()) {
            return Err(BookingError::UnknownTimeSlot {
                slot: request.time_slot,
            });
        }

        let advisor = self
            .advisors
            .get(&request.advisor_id)
            .await
            .ok_or_else(|| BookingError::UnknownAdvisor {
                id: request.advisor_id.clone(),
            })?;
        if advisor.status != TeamMemberStatus::Active {
            return Err(BookingError::InactiveAdvisor { name: advisor.name });
        }

        let participant = self.coordinator.find(&request.participant_id).await?;
        if participant.on_hold {
            return Err(BookingError::OnHold);
        }
        let required = request.visit.required_status();
        if participant.status != required {
            return Err(BookingError::WrongStage {
                visit: request.visit,
                required,
                actual: participant.status,
            });
        }

        // Both visit kinds sit directly before their booked state, so a
        // single advance lands exactly where the form promises. The
        // stage is re-checked inside the transition: a racing booking
        // that lands between our read and the advance turns into
        // WrongStage instead of overshooting the pipeline.
        let notes = format!(
            "{} booked with {} on {} at {}",
            match request.visit {
                VisitKind::InitialAudit => "Initial audit",
                VisitKind::FinalAudit => "Final audit",
            },
            advisor.name,
            request.date,
            request.time_slot,
        );
        let updated = self
            .coordinator
            .advance_from(&request.participant_id, required, actor, Some(&notes))
            .await
            .map_err(|e| match e {
                CoordinatorError::InvalidState(InvalidStateError::UnexpectedStatus {
                    actual,
                    ..
                }) => BookingError::WrongStage {
                    visit: request.visit,
                    required,
                    actual,
                },
                other => BookingError::Coordinator(other),
            })?;

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            participant_id: request.participant_id,
            advisor_id: request.advisor_id,
            date: request.date,
            time_slot: request.time_slot,
            visit: request.visit,
            notes: request.notes,
            created_at: Utc::now(),
        };
        tracing::info!(
            booking_id = %booking.id,
            participant_id = %booking.participant_id,
            advisor = %advisor.name,
            visit = ?booking.visit,
            date = %booking.date,
            "Audit visit booked"
        );
        self.bookings.write().await.push(booking.clone());
        Ok((booking, updated))
    }

    pub async fn bookings(&self) -> Vec<Booking> {
        self.bookings.read().await.clone()
    }

    pub async fn bookings_for(&self, participant_id: &str) -> Vec<Booking> {
        self.bookings
            .read()
            .await
            .iter()
            .filter(|b| b.participant_id == participant_id)
            .cloned()
            .collect()
    }
}
