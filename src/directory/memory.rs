// In-memory participant directory
//
// Replaces the original's process-wide reactive store with an explicit,
// injected repository. A single RwLock over the map makes each save
// atomic; lost updates across read-modify-append sequences are caught by
// the history-length compare-and-swap in `save_if_unchanged`.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::traits::{DirectoryError, ParticipantDirectory};
use crate::lifecycle::Participant;

#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    participants: RwLock<HashMap<String, Participant>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory pre-populated with existing records, skipping
    /// duplicate ids (first record wins).
    pub fn with_participants(participants: Vec<Participant>) -> Self {
        let mut map = HashMap::new();
        for p in participants {
            map.entry(p.id.clone()).or_insert(p);
        }
        Self {
            participants: RwLock::new(map),
        }
    }

    pub async fn len(&self) -> usize {
        self.participants.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.participants.read().await.is_empty()
    }
}

#[async_trait]
impl ParticipantDirectory for InMemoryDirectory {
    async fn insert(&self, participant: Participant) -> Result<(), DirectoryError> {
        let mut map = self.participants.write().await;
        if map.contains_key(&participant.id) {
            return Err(DirectoryError::Duplicate {
                id: participant.id.clone(),
            });
        }
        tracing::debug!(participant_id = %participant.id, "Participant added to directory");
        map.insert(participant.id.clone(), participant);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Participant>, DirectoryError> {
        Ok(self.participants.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Participant>, DirectoryError> {
        let mut all: Vec<Participant> = self.participants.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn save(&self, participant: Participant) -> Result<(), DirectoryError> {
        let mut map = self.participants.write().await;
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
        let mut map = self.participants.write().await;
        let stored = map
            .get(&participant.id)
            .ok_or_else(|| DirectoryError::NotFound {
                id: participant.id.clone(),
            })?;
        if stored.audit_len() != expected_audit_len {
            tracing::warn!(
                participant_id = %participant.id,
                expected = expected_audit_len,
                actual = stored.audit_len(),
                "Concurrent modification detected, rejecting save"
            );
            return Err(DirectoryError::Conflict {
                id: participant.id.clone(),
            });
        }
        map.insert(participant.id.clone(), participant);
        Ok(())
    }
}
