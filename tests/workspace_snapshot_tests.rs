//! Workspace snapshot persistence tests
//!
//! The whole workspace survives a save/load cycle with histories,
//! rosters, bookings, and accounts intact, the tracker's equivalent of
//! a process restart.

use retrofit_tracker::accounts::NewUserAccount;
use retrofit_tracker::booking::{BookingRequest, VisitKind};
use retrofit_tracker::lifecycle::{ParticipantIntake, ParticipantStatus};
use retrofit_tracker::persistence::SnapshotStore;
use retrofit_tracker::workspace::{seed_snapshot, Workspace};
use retrofit_tracker::UserRole;

#[tokio::test]
async fn workspace_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("workspace.json"));

    // Session one: seed, enroll, book, hold, add an account
    {
        let workspace = Workspace::from_snapshot(seed_snapshot());
        let advisor_id = workspace.advisors.list().await[0].id.clone();
        let id = workspace
            .coordinator
            .enroll(ParticipantIntake {
                first_name: "Lisa".to_string(),
                last_name: "Stewart".to_string(),
                program: "Home Energy Assessment".to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
            .id;

        workspace
            .booking_desk
            .book(
                BookingRequest {
                    participant_id: id.clone(),
                    advisor_id,
                    date: chrono::NaiveDate::from_ymd_opt(2024, 3, 21).unwrap(),
                    time_slot: "02:00 PM".to_string(),
                    visit: VisitKind::InitialAudit,
                    notes: None,
                },
                Some("emily"),
            )
            .await
            .unwrap();
        workspace.coordinator.toggle_hold(&id, true, Some("desk")).await.unwrap();

        workspace
            .accounts
            .create(NewUserAccount {
                name: "David Chen".to_string(),
                email: "david.c@example.com".to_string(),
                role: UserRole::TechTeam,
                password: "long enough password".to_string(),
            })
            .await
            .unwrap();

        workspace.persist(&store).await.unwrap();
    }

    // Session two: everything is back
    let workspace = Workspace::load(&store).await.unwrap();
    let participants = workspace.coordinator.list().await.unwrap();
    assert_eq!(participants.len(), 1);

    let p = &participants[0];
    assert_eq!(p.status, ParticipantStatus::Booked);
    assert!(p.on_hold);
    assert_eq!(p.status_history.len(), 1);
    assert_eq!(p.status_history[0].actor.as_deref(), Some("emily"));
    assert_eq!(p.hold_history.len(), 1);

    assert_eq!(workspace.advisors.len().await, 2);
    assert_eq!(workspace.booking_desk.bookings().await.len(), 1);
    assert_eq!(workspace.accounts.list().await.len(), 1);

    // And transitions keep working on the reloaded record
    let p = workspace.coordinator.advance(&p.id, None, None).await.unwrap();
    assert_eq!(p.status, ParticipantStatus::AuditCompleted);
    assert_eq!(p.status_history.len(), 2);
}

#[tokio::test]
async fn loading_a_missing_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("never-written.json"));

    let workspace = Workspace::load(&store).await.unwrap();
    assert!(workspace.directory.is_empty().await);
    assert!(workspace.advisors.is_empty().await);
    assert!(workspace.programs.list().await.is_empty());
}
