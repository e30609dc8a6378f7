use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Lifecycle states of an account. Accounts are never hard-deleted;
/// `Deleted` is a status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Inactive,
    Locked,
    Deleted,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Inactive => "INACTIVE",
            AccountStatus::Locked => "LOCKED",
            AccountStatus::Deleted => "DELETED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(AccountStatus::Active),
            "INACTIVE" => Some(AccountStatus::Inactive),
            "LOCKED" => Some(AccountStatus::Locked),
            "DELETED" => Some(AccountStatus::Deleted),
            _ => None,
        }
    }
}

/// A named permission grouping. Role names are globally unique; equality and
/// hashing go by name only so an account's role set cannot hold duplicates.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for Role {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Built-in role catalog with human descriptions. Custom role names fall
/// back to the name itself as the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Customer,
    Moderator,
}

impl UserRole {
    pub fn authority_name(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Customer => "CUSTOMER",
            UserRole::Moderator => "MODERATOR",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UserRole::Admin => "Administrator",
            UserRole::Customer => "Customer",
            UserRole::Moderator => "Moderator",
        }
    }

    /// Description for an arbitrary role name.
    pub fn describe(name: &str) -> &str {
        match name {
            "ADMIN" => UserRole::Admin.description(),
            "CUSTOMER" => UserRole::Customer.description(),
            "MODERATOR" => UserRole::Moderator.description(),
            other => other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub status: AccountStatus,
    pub roles: HashSet<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// New account with a fresh id, ACTIVE status and an empty role set.
    /// The caller supplies an already-hashed password.
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            first_name,
            last_name,
            phone,
            status: AccountStatus::Active,
            roles: HashSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The account's role names, ordered for stable claim encoding.
    pub fn role_names(&self) -> BTreeSet<String> {
        self.roles.iter().map(|r| r.name.clone()).collect()
    }
}
