// Directory trait - separating lifecycle logic from storage for testability

use async_trait::async_trait;
use thiserror::Error;

use crate::lifecycle::Participant;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("participant {id} not found")]
    NotFound { id: String },
    #[error("participant {id} already exists")]
    Duplicate { id: String },
    #[error("participant {id} was modified concurrently, reload and retry")]
    Conflict { id: String },
}

/// Storage seam for participant records.
///
/// Lifecycle transitions are read-modify-append sequences; callers that
/// may race must persist through `save_if_unchanged` so a concurrent
/// update surfaces as `Conflict` instead of a lost write.
#[async_trait]
pub trait ParticipantDirectory: Send + Sync {
    /// Add a new participant. Fails on id collision.
    async fn insert(&self, participant: Participant) -> Result<(), DirectoryError>;

    /// Look up a participant by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Participant>, DirectoryError>;

    /// All participants, ordered by creation time.
    async fn list(&self) -> Result<Vec<Participant>, DirectoryError>;

    /// Unconditional overwrite of an existing record.
    async fn save(&self, participant: Participant) -> Result<(), DirectoryError>;

    /// Compare-and-swap on the audit-trail length: persists only if the
    /// stored record's `audit_len()` still equals `expected_audit_len`.
    async fn save_if_unchanged(
        &self,
        participant: Participant,
        expected_audit_len: usize,
    ) -> Result<(), DirectoryError>;
}
