// Participant Coordination - transitions against the stored record
//
// Fetch, apply the lifecycle transition, persist through the
// history-length compare-and-swap so two admins racing on the same
// participant cannot lose an update.

use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

use crate::directory::{DirectoryError, ParticipantDirectory};
use crate::lifecycle::{
    InvalidStateError, Participant, ParticipantIntake, ParticipantLifecycle, ParticipantStatus,
};
use crate::telemetry::create_transition_span;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("participant {id} not found")]
    NotFound { id: String },
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Ties the injected directory and the pure lifecycle together. This is
/// the unit the CLI (and any future service layer) calls.
pub struct ParticipantCoordinator {
    directory: Arc<dyn ParticipantDirectory>,
    lifecycle: ParticipantLifecycle,
}

impl ParticipantCoordinator {
    pub fn new(directory: Arc<dyn ParticipantDirectory>) -> Self {
        Self {
            directory,
            lifecycle: ParticipantLifecycle::new(),
        }
    }

    pub fn directory(&self) -> &Arc<dyn ParticipantDirectory> {
        &self.directory
    }

    /// Register a new participant at the start of the pipeline.
    pub async fn enroll(&self, intake: ParticipantIntake) -> Result<Participant, CoordinatorError> {
        let participant = Participant::new(intake);
        self.directory.insert(participant.clone()).await?;
        tracing::info!(
            participant_id = %participant.id,
            name = %participant.full_name(),
            program = %participant.program,
            "Participant enrolled"
        );
        Ok(participant)
    }

    /// Move a participant one pipeline position forward.
    pub async fn advance(
        &self,
        id: &str,
        actor: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Participant, CoordinatorError> {
        let span = create_transition_span("advance", id, actor);
        self.transition(id, |lifecycle, p| lifecycle.advance(p, actor, notes))
            .instrument(span)
            .await
    }

    /// Move a participant one pipeline position backward.
    pub async fn revert(
        &self,
        id: &str,
        actor: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Participant, CoordinatorError> {
        let span = create_transition_span("revert", id, actor);
        self.transition(id, |lifecycle, p| lifecycle.revert(p, actor, notes))
            .instrument(span)
            .await
    }

    /// Administrative override: jump to an arbitrary pipeline state.
    pub async fn set_status(
        &self,
        id: &str,
        target: ParticipantStatus,
        actor: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Participant, CoordinatorError> {
        let span = create_transition_span("set_status", id, actor);
        self.transition(id, |lifecycle, p| {
            lifecycle.set_status(p, target, actor, notes)
        })
        .instrument(span)
        .await
    }

    /// Advance only if the freshly read record is still at `expected`.
    /// Closes the window between a caller's earlier read and this
    /// transition, so a racing mutation cannot overshoot the pipeline.
    pub async fn advance_from(
        &self,
        id: &str,
        expected: ParticipantStatus,
        actor: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Participant, CoordinatorError> {
        let span = create_transition_span("advance", id, actor);
        self.transition(id, |lifecycle, p| {
            if p.status != expected {
                return Err(InvalidStateError::UnexpectedStatus {
                    expected,
                    actual: p.status,
                });
            }
            lifecycle.advance(p, actor, notes)
        })
        .instrument(span)
        .await
    }

    /// Pause or resume a participant's file without moving the pipeline.
    pub async fn toggle_hold(
        &self,
        id: &str,
        on_hold: bool,
        actor: Option<&str>,
    ) -> Result<Participant, CoordinatorError> {
        self.transition(id, |lifecycle, p| {
            lifecycle.toggle_hold(p, on_hold, actor);
            Ok(())
        })
        .await
    }

    pub async fn find(&self, id: &str) -> Result<Participant, CoordinatorError> {
        self.directory
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoordinatorError::NotFound { id: id.to_string() })
    }

    pub async fn list(&self) -> Result<Vec<Participant>, CoordinatorError> {
        Ok(self.directory.list().await?)
    }

    async fn transition<F>(&self, id: &str, apply: F) -> Result<Participant, CoordinatorError>
    where
        F: FnOnce(&ParticipantLifecycle, &mut Participant) -> Result<(), InvalidStateError>,
    {
        let mut participant = self.find(id).await?;
        let audit_len = participant.audit_len();

        apply(&self.lifecycle, &mut participant)?;

        self.directory
            .save_if_unchanged(participant.clone(), audit_len)
            .await?;
        Ok(participant)
    }
}
