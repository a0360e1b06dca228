// Retrofit Tracker Library - Energy-Audit Program Coordination
// This exposes the core components for testing and integration

pub mod accounts;
pub mod booking;
pub mod config;
pub mod coordinator;
pub mod directory;
pub mod lifecycle;
pub mod persistence;
pub mod program;
pub mod roster;
pub mod telemetry;
pub mod validation;
pub mod workspace;

// Re-export key types for easy access
pub use accounts::{AccountRegistry, NewUserAccount, UserAccount, UserRole};
pub use booking::{Booking, BookingDesk, BookingError, BookingRequest, VisitKind, TIME_SLOTS};
pub use config::{config, RetrofitConfig};
pub use coordinator::{CoordinatorError, ParticipantCoordinator};
pub use directory::{DirectoryError, InMemoryDirectory, ParticipantDirectory};
pub use lifecycle::{
    HoldEvent, InvalidStateError, Participant, ParticipantIntake, ParticipantLifecycle,
    ParticipantStatus, StatusHistoryEntry, PIPELINE,
};
pub use persistence::{PersistenceError, SnapshotStore, WorkspaceSnapshot};
pub use program::{Program, ProgramCatalog, ProgramStatus};
pub use roster::{BookingAgent, Contractor, EnergyAdvisor, Roster, TechTeamMember};
pub use telemetry::{create_transition_span, generate_correlation_id, init_telemetry};
pub use validation::{FieldValidator, ValidationError};
pub use workspace::{seed_snapshot, Workspace};
