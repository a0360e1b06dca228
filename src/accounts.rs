// Team-member accounts
//
// Only the roster of accounts is kept; passwords are checked at
// creation time and discarded (authentication itself is out of scope).

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use std::collections::BTreeMap;

use crate::validation::{FieldValidator, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    EnergyAdvisor,
    BookingAgent,
    TechTeam,
    Trainee,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Administrator",
            UserRole::EnergyAdvisor => "Energy Advisor",
            UserRole::BookingAgent => "Booking Agent",
            UserRole::TechTeam => "Tech Team",
            UserRole::Trainee => "Trainee",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// New-account form, validated before the account is created.
#[derive(Debug, Clone)]
pub struct NewUserAccount {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub password: String,
}

impl NewUserAccount {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = FieldValidator::new();
        v.require("name", &self.name)
            .email("email", &self.email)
            .min_length("password", &self.password, 8);
        v.finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("an account already exists for {email}")]
    DuplicateEmail { email: String },
    #[error("account {id} not found")]
    NotFound { id: String },
}

/// In-memory account registry keyed by id, with unique emails.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: RwLock<BTreeMap<String, UserAccount>>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: Vec<UserAccount>) -> Self {
        let mut map = BTreeMap::new();
        for account in accounts {
            map.entry(account.id.clone()).or_insert(account);
        }
        Self {
            accounts: RwLock::new(map),
        }
    }

    pub async fn create(&self, form: NewUserAccount) -> Result<UserAccount, AccountError> {
        form.validate()?;
        let mut map = self.accounts.write().await;
        if map.values().any(|a| a.email == form.email) {
            return Err(AccountError::DuplicateEmail { email: form.email });
        }
        let account = UserAccount {
            id: Uuid::new_v4().to_string(),
            name: form.name,
            email: form.email,
            role: form.role,
        };
        tracing::info!(
            account_id = %account.id,
            email = %account.email,
            role = ?account.role,
            "User account created"
        );
        map.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    pub async fn list(&self) -> Vec<UserAccount> {
        self.accounts.read().await.values().cloned().collect()
    }

    pub async fn remove(&self, id: &str) -> Result<UserAccount, AccountError> {
        self.accounts
            .write()
            .await
            .remove(id)
            .ok_or_else(|| AccountError::NotFound { id: id.to_string() })
    }
}
