// Team Roster Module - advisors, booking agents, tech team, contractors

pub mod store;
pub mod types;

pub use store::{Roster, RosterError};
pub use types::{
    new_record_id, BookingAgent, CertificationLevel, Contractor, EnergyAdvisor, RosterRecord,
    TeamMemberStatus, TechTeamMember,
};
