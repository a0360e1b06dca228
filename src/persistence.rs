// Workspace snapshot persistence
//
// The whole workspace (participants, rosters, programs, accounts,
// bookings) lives in one JSON snapshot, loaded at startup and written
// after mutating commands. Writes go to a temp file first, then rename
// (atomic operation) so a crash mid-write never leaves a torn snapshot.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::accounts::UserAccount;
use crate::booking::Booking;
use crate::lifecycle::Participant;
use crate::program::Program;
use crate::roster::{BookingAgent, Contractor, EnergyAdvisor, TechTeamMember};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Serialized form of the whole workspace.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub energy_advisors: Vec<EnergyAdvisor>,
    #[serde(default)]
    pub booking_agents: Vec<BookingAgent>,
    #[serde(default)]
    pub tech_team: Vec<TechTeamMember>,
    #[serde(default)]
    pub contractors: Vec<Contractor>,
    #[serde(default)]
    pub programs: Vec<Program>,
    #[serde(default)]
    pub accounts: Vec<UserAccount>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

/// Loads and stores workspace snapshots at a fixed path.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the snapshot, or `None` when no file exists yet.
    pub async fn load(&self) -> Result<Option<WorkspaceSnapshot>, PersistenceError> {
        if !self.path.exists() {
            tracing::info!(file = ?self.path, "No existing workspace snapshot found");
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).await?;
        let snapshot: WorkspaceSnapshot = serde_json::from_str(&contents)?;
        tracing::debug!(
            file = ?self.path,
            participants = snapshot.participants.len(),
            "Workspace snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    pub async fn save(&self, snapshot: &WorkspaceSnapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let serialized = serde_json::to_string_pretty(snapshot)?;

        // Write to temporary file first, then rename (atomic operation)
        let temp_file = self.path.with_extension("json.tmp");
        fs::write(&temp_file, serialized).await?;
        fs::rename(&temp_file, &self.path).await?;

        tracing::debug!(
            file = ?self.path,
            participants = snapshot.participants.len(),
            "Workspace snapshot saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{ParticipantIntake, ParticipantLifecycle, ParticipantStatus};

    #[tokio::test]
    async fn missing_snapshot_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("workspace.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn snapshot_round_trip_preserves_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("nested/workspace.json"));

        let mut participant = Participant::new(ParticipantIntake {
            first_name: "John".to_string(),
            last_name: "MacDonald".to_string(),
            ..Default::default()
        });
        let lifecycle = ParticipantLifecycle::new();
        lifecycle.advance(&mut participant, Some("desk"), None).unwrap();
        lifecycle.toggle_hold(&mut participant, true, None);

        let snapshot = WorkspaceSnapshot {
            participants: vec![participant],
            ..Default::default()
        };
        store.save(&snapshot).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.participants.len(), 1);
        let p = &loaded.participants[0];
        assert_eq!(p.status, ParticipantStatus::Booked);
        assert_eq!(p.status_history.len(), 1);
        assert_eq!(p.status_history[0].actor.as_deref(), Some("desk"));
        assert_eq!(p.hold_history.len(), 1);
        assert!(p.on_hold);
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_an_error_not_a_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workspace.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let store = SnapshotStore::new(&path);
        assert!(matches!(
            store.load().await.unwrap_err(),
            PersistenceError::Corrupt(_)
        ));
    }
}
