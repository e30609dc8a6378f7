// Shared by multiple test binaries; not every binary uses every helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use parkora_auth::config::AuthConfig;
use parkora_auth::db::models::{Account, Role};
use parkora_auth::db::{AccountStore, RoleStore};
use parkora_auth::error::{AppError, DatabaseError};
use parkora_auth::{AuthService, BcryptHasher, JwtService};

/// In-memory stand-in for the Postgres store. Uniqueness is enforced at
/// save time the way the real unique constraints would enforce it.
#[derive(Default)]
pub struct InMemoryStore {
    accounts: Mutex<Vec<Account>>,
    roles: Mutex<Vec<Role>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role_count(&self) -> usize {
        self.roles.lock().unwrap().len()
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.username == username).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().any(|a| a.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().any(|a| a.email == email))
    }

    async fn save(&self, account: Account) -> Result<Account, AppError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.username == account.username) {
            return Err(AppError::DatabaseError(DatabaseError::UniqueViolation(
                "users_username_key".to_string(),
            )));
        }
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AppError::DatabaseError(DatabaseError::UniqueViolation(
                "users_email_key".to_string(),
            )));
        }
        accounts.push(account.clone());
        Ok(account)
    }
}

#[async_trait]
impl RoleStore for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        let roles = self.roles.lock().unwrap();
        Ok(roles.iter().find(|r| r.name == name).cloned())
    }

    async fn get_or_create(&self, name: &str, description: &str) -> Result<Role, AppError> {
        let mut roles = self.roles.lock().unwrap();
        if let Some(existing) = roles.iter().find(|r| r.name == name) {
            return Ok(existing.clone());
        }
        let role = Role {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some(description.to_string()),
        };
        roles.push(role.clone());
        Ok(role)
    }
}

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration_test_secret_0123456789abcdef".to_string(),
        issuer: "parkora-test".to_string(),
        token_expiry_millis: 3_600_000,
        default_role: "CUSTOMER".to_string(),
    }
}

/// Auth service over a fresh in-memory store, with a fast bcrypt cost.
pub fn test_service(store: Arc<InMemoryStore>) -> AuthService {
    let config = test_auth_config();
    let jwt = JwtService::new(&config).expect("test secret should be accepted");
    AuthService::new(
        store.clone(),
        store,
        Arc::new(BcryptHasher::new(4)),
        jwt,
        config.default_role,
    )
}
