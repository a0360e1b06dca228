// Team roster record shapes

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamMemberStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificationLevel {
    Trainee,
    Intermediate,
    Senior,
}

/// Field staff performing initial and final audits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyAdvisor {
    pub id: String,
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub service_areas: Vec<String>,
    pub preferred_days: Vec<String>,
    pub total_contract_units: u32,
    pub programs_trained_in: Vec<String>,
    pub status: TeamMemberStatus,
    pub certification_level: CertificationLevel,
    pub max_audits_per_day: u32,
    pub average_audit_duration_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingAgent {
    pub id: String,
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub programs_booked: Vec<String>,
    pub status: TeamMemberStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechTeamMember {
    pub id: String,
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub programs: Vec<String>,
    pub status: TeamMemberStatus,
}

/// Retrofit contractor receiving work orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contractor {
    pub id: String,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub services_offered: Vec<String>,
    pub areas_serviced: Vec<String>,
    pub is_preferred: bool,
    pub status: TeamMemberStatus,
}

/// Anything the roster store can file and list. Gives `Roster<T>` a
/// uniform view of the four team record shapes.
pub trait RosterRecord: Clone {
    fn id(&self) -> &str;
    fn display_name(&self) -> &str;
}

macro_rules! roster_record {
    ($ty:ty) => {
        impl RosterRecord for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn display_name(&self) -> &str {
                &self.name
            }
        }
    };
}

roster_record!(EnergyAdvisor);
roster_record!(BookingAgent);
roster_record!(TechTeamMember);
roster_record!(Contractor);

pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}
