// Program administration - offerings, document and HOT2000 requirements

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    Image,
    Pdf,
    Hot2000,
    Other,
}

/// Pipeline stage a document is collected at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStage {
    InitialAudit,
    FinalAudit,
    PostRetrofit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequirement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: DocumentKind,
    pub required: bool,
    /// Upload limit in MB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,
    #[serde(default)]
    pub allowed_formats: Vec<String>,
    pub stage: DocumentStage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Hot2000Category {
    Heating,
    Cooling,
    Ventilation,
    Envelope,
    Other,
}

/// An energy-model value the program tracks against a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hot2000Requirement {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub category: Hot2000Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
}

/// One energy-efficiency program a participant can enroll in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub document_requirements: Vec<DocumentRequirement>,
    #[serde(default)]
    pub hot2000_requirements: Vec<Hot2000Requirement>,
    pub status: ProgramStatus,
}

impl Program {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            document_requirements: Vec::new(),
            hot2000_requirements: Vec::new(),
            status: ProgramStatus::Active,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgramError {
    #[error("program {id} not found")]
    NotFound { id: String },
    #[error("a program named {name:?} already exists")]
    DuplicateName { name: String },
}

/// In-memory program catalog. Names are unique; lookups work by id or
/// exact name since intake forms reference programs by name.
#[derive(Debug, Default)]
pub struct ProgramCatalog {
    programs: RwLock<BTreeMap<String, Program>>,
}

impl ProgramCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_programs(programs: Vec<Program>) -> Self {
        let mut map = BTreeMap::new();
        for program in programs {
            map.entry(program.id.clone()).or_insert(program);
        }
        Self {
            programs: RwLock::new(map),
        }
    }

    pub async fn add(&self, program: Program) -> Result<(), ProgramError> {
        let mut map = self.programs.write().await;
        if map.values().any(|p| p.name == program.name) {
            return Err(ProgramError::DuplicateName {
                name: program.name.clone(),
            });
        }
        tracing::info!(program_id = %program.id, name = %program.name, "Program added");
        map.insert(program.id.clone(), program);
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Option<Program> {
        self.programs.read().await.get(id).cloned()
    }

    pub async fn find_by_name(&self, name: &str) -> Option<Program> {
        self.programs
            .read()
            .await
            .values()
            .find(|p| p.name == name)
            .cloned()
    }

    pub async fn list(&self) -> Vec<Program> {
        self.programs.read().await.values().cloned().collect()
    }

    pub async fn set_status(&self, id: &str, status: ProgramStatus) -> Result<(), ProgramError> {
        let mut map = self.programs.write().await;
        let program = map
            .get_mut(id)
            .ok_or_else(|| ProgramError::NotFound { id: id.to_string() })?;
        program.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_program_is_active_with_no_requirements() {
        let p = Program::new("Home Energy Assessment", "Residential audit program");
        assert_eq!(p.status, ProgramStatus::Active);
        assert!(p.document_requirements.is_empty());
        assert!(p.hot2000_requirements.is_empty());
    }

    #[tokio::test]
    async fn catalog_rejects_duplicate_names() {
        let catalog = ProgramCatalog::new();
        catalog
            .add(Program::new("Home Energy Assessment", "first"))
            .await
            .unwrap();
        let err = catalog
            .add(Program::new("Home Energy Assessment", "second"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProgramError::DuplicateName {
                name: "Home Energy Assessment".to_string()
            }
        );
    }

    #[tokio::test]
    async fn lookup_by_name_and_deactivate() {
        let catalog = ProgramCatalog::new();
        let program = Program::new("Multi-Unit Residential", "Apartment retrofits");
        let id = program.id.clone();
        catalog.add(program).await.unwrap();

        let found = catalog.find_by_name("Multi-Unit Residential").await.unwrap();
        assert_eq!(found.id, id);

        catalog.set_status(&id, ProgramStatus::Inactive).await.unwrap();
        assert_eq!(
            catalog.get(&id).await.unwrap().status,
            ProgramStatus::Inactive
        );
        assert_eq!(
            catalog
                .set_status("missing", ProgramStatus::Active)
                .await
                .unwrap_err(),
            ProgramError::NotFound {
                id: "missing".to_string()
            }
        );
    }
}
