// Workspace assembly
//
// Builds the in-memory stores from a snapshot, hands out the
// coordinator and desks, and collects everything back into a snapshot
// after mutating commands.

use anyhow::Result;
use std::sync::Arc;

use crate::accounts::AccountRegistry;
use crate::booking::BookingDesk;
use crate::coordinator::ParticipantCoordinator;
use crate::directory::{InMemoryDirectory, ParticipantDirectory};
use crate::persistence::{SnapshotStore, WorkspaceSnapshot};
use crate::program::{Program, ProgramCatalog};
use crate::roster::{
    new_record_id, BookingAgent, CertificationLevel, Contractor, EnergyAdvisor, Roster,
    TeamMemberStatus, TechTeamMember,
};

pub struct Workspace {
    pub directory: Arc<InMemoryDirectory>,
    pub coordinator: Arc<ParticipantCoordinator>,
    pub advisors: Arc<Roster<EnergyAdvisor>>,
    pub booking_agents: Arc<Roster<BookingAgent>>,
    pub tech_team: Arc<Roster<TechTeamMember>>,
    pub contractors: Arc<Roster<Contractor>>,
    pub programs: Arc<ProgramCatalog>,
    pub accounts: Arc<AccountRegistry>,
    pub booking_desk: BookingDesk,
}

impl Workspace {
    pub fn from_snapshot(snapshot: WorkspaceSnapshot) -> Self {
        let directory = Arc::new(InMemoryDirectory::with_participants(snapshot.participants));
        let coordinator = Arc::new(ParticipantCoordinator::new(
            directory.clone() as Arc<dyn ParticipantDirectory>
        ));
        let advisors = Arc::new(Roster::with_records(snapshot.energy_advisors));
        let booking_desk = BookingDesk::with_bookings(
            coordinator.clone(),
            advisors.clone(),
            snapshot.bookings,
        );
        Self {
            directory,
            coordinator,
            advisors,
            booking_agents: Arc::new(Roster::with_records(snapshot.booking_agents)),
            tech_team: Arc::new(Roster::with_records(snapshot.tech_team)),
            contractors: Arc::new(Roster::with_records(snapshot.contractors)),
            programs: Arc::new(ProgramCatalog::with_programs(snapshot.programs)),
            accounts: Arc::new(AccountRegistry::with_accounts(snapshot.accounts)),
            booking_desk,
        }
    }

    pub fn empty() -> Self {
        Self::from_snapshot(WorkspaceSnapshot::default())
    }

    /// Load from the snapshot store, starting empty when none exists.
    pub async fn load(store: &SnapshotStore) -> Result<Self> {
        let snapshot = store.load().await?.unwrap_or_default();
        Ok(Self::from_snapshot(snapshot))
    }

    /// Collect every store back into a serializable snapshot.
    pub async fn snapshot(&self) -> Result<WorkspaceSnapshot> {
        Ok(WorkspaceSnapshot {
            participants: self.directory.list().await?,
            energy_advisors: self.advisors.list().await,
            booking_agents: self.booking_agents.list().await,
            tech_team: self.tech_team.list().await,
            contractors: self.contractors.list().await,
            programs: self.programs.list().await,
            accounts: self.accounts.list().await,
            bookings: self.booking_desk.bookings().await,
        })
    }

    pub async fn persist(&self, store: &SnapshotStore) -> Result<()> {
        store.save(&self.snapshot().await?).await?;
        Ok(())
    }
}

/// Sample rosters and programs for a freshly initialized workspace,
/// matching the records the admin screens shipped with.
pub fn seed_snapshot() -> WorkspaceSnapshot {
    let advisors = vec![
        EnergyAdvisor {
            id: new_record_id(),
            name: "Alex MacDonald".to_string(),
            title: "Senior Energy Advisor".to_string(),
            email: "alex.m@example.com".to_string(),
            phone: "(902) 555-0101".to_string(),
            service_areas: vec![
                "Halifax Regional Municipality".to_string(),
                "Dartmouth".to_string(),
            ],
            preferred_days: vec![
                "Monday".to_string(),
                "Tuesday".to_string(),
                "Wednesday".to_string(),
            ],
            total_contract_units: 50,
            programs_trained_in: vec![
                "Home Energy Assessment".to_string(),
                "Commercial Energy Audit".to_string(),
            ],
            status: TeamMemberStatus::Active,
            certification_level: CertificationLevel::Senior,
            max_audits_per_day: 3,
            average_audit_duration_minutes: 120,
        },
        EnergyAdvisor {
            id: new_record_id(),
            name: "Sarah Thompson".to_string(),
            title: "Energy Advisor".to_string(),
            email: "sarah.t@example.com".to_string(),
            phone: "(902) 555-0102".to_string(),
            service_areas: vec!["Bedford".to_string(), "Sackville".to_string()],
            preferred_days: vec![
                "Wednesday".to_string(),
                "Thursday".to_string(),
                "Friday".to_string(),
            ],
            total_contract_units: 35,
            programs_trained_in: vec!["Home Energy Assessment".to_string()],
            status: TeamMemberStatus::Active,
            certification_level: CertificationLevel::Intermediate,
            max_audits_per_day: 2,
            average_audit_duration_minutes: 150,
        },
    ];

    let booking_agents = vec![BookingAgent {
        id: new_record_id(),
        name: "Emily Wilson".to_string(),
        title: "Senior Booking Agent".to_string(),
        email: "emily.w@example.com".to_string(),
        phone: "(902) 555-0201".to_string(),
        programs_booked: vec![
            "Home Energy Assessment".to_string(),
            "Commercial Energy Audit".to_string(),
        ],
        status: TeamMemberStatus::Active,
    }];

    let tech_team = vec![TechTeamMember {
        id: new_record_id(),
        name: "David Chen".to_string(),
        title: "Technical Reviewer".to_string(),
        email: "david.c@example.com".to_string(),
        phone: "(902) 555-0301".to_string(),
        programs: vec![
            "Home Energy Assessment".to_string(),
            "Commercial Energy Audit".to_string(),
        ],
        status: TeamMemberStatus::Active,
    }];

    let contractors = vec![Contractor {
        id: new_record_id(),
        name: "Nova Scotia Energy Solutions".to_string(),
        contact_person: "James MacPherson".to_string(),
        phone: "(902) 555-0401".to_string(),
        email: "james@nsenergyservices.com".to_string(),
        services_offered: vec![
            "Heat Pump Installation".to_string(),
            "Insulation".to_string(),
            "Air Sealing".to_string(),
        ],
        areas_serviced: vec![
            "Halifax Regional Municipality".to_string(),
            "Dartmouth".to_string(),
        ],
        is_preferred: true,
        status: TeamMemberStatus::Active,
    }];

    let programs = vec![
        Program::new(
            "Home Energy Assessment",
            "Residential audit and retrofit program",
        ),
        Program::new("Commercial Energy Audit", "Commercial building assessments"),
        Program::new("Multi-Unit Residential", "Apartment and condo retrofits"),
    ];

    WorkspaceSnapshot {
        energy_advisors: advisors,
        booking_agents,
        tech_team,
        contractors,
        programs,
        ..Default::default()
    }
}
