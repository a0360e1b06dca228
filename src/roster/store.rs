// Generic in-memory roster store

use std::collections::BTreeMap;
use thiserror::Error;
use tokio::sync::RwLock;

use super::types::RosterRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("record {id} not found")]
    NotFound { id: String },
    #[error("record {id} already exists")]
    Duplicate { id: String },
}

/// In-memory CRUD store for one roster (advisors, agents, tech team,
/// contractors). A BTreeMap keeps listings in stable id order.
#[derive(Debug)]
pub struct Roster<T: RosterRecord> {
    records: RwLock<BTreeMap<String, T>>,
}

impl<T: RosterRecord> Roster<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn with_records(records: Vec<T>) -> Self {
        let mut map = BTreeMap::new();
        for record in records {
            map.entry(record.id().to_string()).or_insert(record);
        }
        Self {
            records: RwLock::new(map),
        }
    }

    pub async fn add(&self, record: T) -> Result<(), RosterError> {
        let mut map = self.records.write().await;
        if map.contains_key(record.id()) {
            return Err(RosterError::Duplicate {
                id: record.id().to_string(),
            });
        }
        tracing::debug!(record_id = %record.id(), name = %record.display_name(), "Roster record added");
        map.insert(record.id().to_string(), record);
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        self.records.read().await.get(id).cloned()
    }

    pub async fn list(&self) -> Vec<T> {
        self.records.read().await.values().cloned().collect()
    }

    pub async fn remove(&self, id: &str) -> Result<T, RosterError> {
        self.records
            .write()
            .await
            .remove(id)
            .ok_or_else(|| RosterError::NotFound { id: id.to_string() })
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
