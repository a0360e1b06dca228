// Mock directory for testing - records every operation, no side effects

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::{DirectoryError, ParticipantDirectory};
use crate::lifecycle::Participant;

/// Operations the mock has seen, for assertion in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryOp {
    Insert { id: String },
    FindById { id: String },
    List,
    Save { id: String },
    SaveIfUnchanged { id: String, expected_len: usize },
}

/// Mock participant directory backed by a plain map.
///
/// Tests can pre-load records, force the next save to fail, and inspect
/// the exact sequence of operations a caller issued.
#[derive(Debug, Default)]
pub struct MockParticipantDirectory {
    participants: Mutex<HashMap<String, Participant>>,
    executed_ops: Mutex<Vec<DirectoryOp>>,
    fail_next_save: Mutex<Option<DirectoryError>>,
}

impl MockParticipantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_participant(participant: Participant) -> Self {
        let mock = Self::new();
        mock.participants
            .lock()
            .unwrap()
            .insert(participant.id.clone(), participant);
        mock
    }

    pub fn set_fail_next_save(&self, error: DirectoryError) {
        *self.fail_next_save.lock().unwrap() = Some(error);
    }

    pub fn executed_ops(&self) -> Vec<DirectoryOp> {
        self.executed_ops.lock().unwrap().clone()
    }

    pub fn stored(&self, id: &str) -> Option<Participant> {
        self.participants.lock().unwrap().get(id).cloned()
    }

    fn record(&self, op: DirectoryOp) {
        self.executed_ops.lock().unwrap().push(op);
    }

    fn take_forced_failure(&self) -> Option<DirectoryError> {
        self.fail_next_save.lock().unwrap().take()
    }
}

#[async_trait]
impl ParticipantDirectory for MockParticipantDirectory {
    async fn insert(&self, participant: Participant) -> Result<(), DirectoryError> {
        self.record(DirectoryOp::Insert {
            id: participant.id.clone(),
        });
        let mut map = self.participants.lock().unwrap();
        if map.contains_key(&participant.id) {
            return Err(DirectoryError::Duplicate {
                id: participant.id.clone(),
            });
        }
        map.insert(participant.id.clone(), participant);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Participant>, DirectoryError> {
        self.record(DirectoryOp::FindById { id: id.to_string() });
        Ok(self.participants.lock().unwrap().get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Participant>, DirectoryError> {
        self.record(DirectoryOp::List);
        let mut all: Vec<Participant> =
            self.participants.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }

    async fn save(&self, participant: Participant) -> Result<(), DirectoryError> {
        self.record(DirectoryOp::Save {
            id: participant.id.clone(),
        });
        if let Some(err) = self.take_forced_failure() {
            return Err(err);
        }
        let mut map = self.participants.lock().unwrap();
        if !map.contains_key(&participant.id) {
            return Err(DirectoryError::NotFound {
                id: participant.id.clone(),
            });
        }
        map.insert(participant.id.clone(), participant);
        Ok(())
    }

    async fn save_if_unchanged(
        &self,
        participant: Participant,
        expected_audit_len: usize,
    ) -> Result<(), DirectoryError> {
        self.record(DirectoryOp::SaveIfUnchanged {
            id: participant.id.clone(),
            expected_len: expected_audit_len,
        });
        if let Some(err) = self.take_forced_failure() {
            return Err(err);
        }
        let mut map = self.participants.lock().unwrap();
        let stored = map
            .get(&participant.id)
            .ok_or_else(|| DirectoryError::NotFound {
                id: participant.id.clone(),
            })?;
        if stored.audit_len() != expected_audit_len {
            return Err(DirectoryError::Conflict {
                id: participant.id.clone(),
            });
        }
        map.insert(participant.id.clone(), participant);
        Ok(())
    }
}
