// Pipeline transition rules for participants
//
// The pipeline is a total order, so the adjacency rules reduce to an
// index walk over PIPELINE. Every successful transition appends exactly
// one history entry, and the last entry always matches the current
// status. That pair is the invariant everything downstream relies on.

use chrono::Utc;
use thiserror::Error;

use super::status::{ParticipantStatus, PIPELINE};
use super::types::{HoldEvent, Participant, StatusHistoryEntry};

/// A transition that would step outside the pipeline bounds.
///
/// Always local and recoverable: callers are expected to disable the
/// corresponding action rather than surface this as a failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidStateError {
    #[error("status {status} is not a pipeline position")]
    OffPipeline { status: ParticipantStatus },
    #[error("participant is already at {status}, the final pipeline state")]
    AlreadyTerminal { status: ParticipantStatus },
    #[error("participant is already at {status}, the first pipeline state")]
    AlreadyAtStart { status: ParticipantStatus },
    #[error("participant is at {actual}, expected {expected}")]
    UnexpectedStatus {
        expected: ParticipantStatus,
        actual: ParticipantStatus,
    },
}

/// Owns the canonical pipeline order and applies transitions.
///
/// Pure with respect to I/O: operations mutate the in-memory record and
/// return; persisting the result is the caller's job.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParticipantLifecycle;

impl ParticipantLifecycle {
    pub fn new() -> Self {
        Self
    }

    /// Move one pipeline position forward.
    pub fn advance(
        &self,
        participant: &mut Participant,
        actor: Option<&str>,
        notes: Option<&str>,
    ) -> Result<(), InvalidStateError> {
        let index = Self::pipeline_index(participant)?;
        if index + 1 >= PIPELINE.len() {
            return Err(InvalidStateError::AlreadyTerminal {
                status: participant.status,
            });
        }
        let next = PIPELINE[index + 1];
        Self::apply(participant, next, actor, notes);
        tracing::info!(
            participant_id = %participant.id,
            from = %PIPELINE[index],
            to = %next,
            actor = actor,
            "Participant advanced"
        );
        Ok(())
    }

    /// Move one pipeline position backward.
    pub fn revert(
        &self,
        participant: &mut Participant,
        actor: Option<&str>,
        notes: Option<&str>,
    ) -> Result<(), InvalidStateError> {
        let index = Self::pipeline_index(participant)?;
        if index == 0 {
            return Err(InvalidStateError::AlreadyAtStart {
                status: participant.status,
            });
        }
        let prev = PIPELINE[index - 1];
        Self::apply(participant, prev, actor, notes);
        tracing::info!(
            participant_id = %participant.id,
            from = %PIPELINE[index],
            to = %prev,
            actor = actor,
            "Participant reverted"
        );
        Ok(())
    }

    /// Administrative override: jump directly to any pipeline state,
    /// bypassing adjacency checks. Callers needing strict-sequential
    /// guarantees must use `advance`/`revert` only. The target itself
    /// must be a pipeline position; an override can never strand a
    /// file off the pipeline.
    pub fn set_status(
        &self,
        participant: &mut Participant,
        target: ParticipantStatus,
        actor: Option<&str>,
        notes: Option<&str>,
    ) -> Result<(), InvalidStateError> {
        if !target.is_in_pipeline() {
            return Err(InvalidStateError::OffPipeline { status: target });
        }
        let from = participant.status;
        Self::apply(participant, target, actor, notes);
        tracing::warn!(
            participant_id = %participant.id,
            from = %from,
            to = %target,
            actor = actor,
            "Administrative status override"
        );
        Ok(())
    }

    /// Pause or resume a file. Leaves `status` and `status_history`
    /// untouched; the event lands in the separate hold trail.
    pub fn toggle_hold(&self, participant: &mut Participant, on_hold: bool, actor: Option<&str>) {
        participant.on_hold = on_hold;
        participant.hold_history.push(HoldEvent {
            on_hold,
            timestamp: Utc::now(),
            actor: actor.map(str::to_string),
        });
        tracing::info!(
            participant_id = %participant.id,
            on_hold = on_hold,
            actor = actor,
            "Participant hold toggled"
        );
    }

    fn pipeline_index(participant: &Participant) -> Result<usize, InvalidStateError> {
        participant
            .status
            .pipeline_index()
            .ok_or(InvalidStateError::OffPipeline {
                status: participant.status,
            })
    }

    fn apply(
        participant: &mut Participant,
        status: ParticipantStatus,
        actor: Option<&str>,
        notes: Option<&str>,
    ) {
        participant.status = status;
        participant.status_history.push(StatusHistoryEntry {
            status,
            timestamp: Utc::now(),
            actor: actor.map(str::to_string),
            notes: notes.map(str::to_string),
        });
    }
}
