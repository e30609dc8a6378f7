use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::auth::password::PasswordHasher;
use crate::db::models::{Account, UserRole};
use crate::db::{AccountStore, RoleStore};
use crate::error::{AppError, DatabaseError, RegistrationError};

/// Registration input. Debug output redacts the plaintext password so the
/// request can never leak it into logs.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone", &self.phone)
            .finish()
    }
}

/// Provisions new accounts: uniqueness checks, password hashing, default
/// role assignment and a single-transaction save.
pub struct Registrar {
    accounts: Arc<dyn AccountStore>,
    roles: Arc<dyn RoleStore>,
    hasher: Arc<dyn PasswordHasher>,
    default_role: String,
}

impl Registrar {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        roles: Arc<dyn RoleStore>,
        hasher: Arc<dyn PasswordHasher>,
        default_role: String,
    ) -> Self {
        Self {
            accounts,
            roles,
            hasher,
            default_role,
        }
    }

    /// The username check always precedes the email check, and the first
    /// violation short-circuits: a request conflicting on both reports only
    /// the username conflict.
    pub async fn register(&self, request: RegistrationRequest) -> Result<Account, AppError> {
        if self.accounts.exists_by_username(&request.username).await? {
            return Err(RegistrationError::DuplicateUsername.into());
        }

        if self.accounts.exists_by_email(&request.email).await? {
            return Err(RegistrationError::DuplicateEmail.into());
        }

        // Plaintext is dropped here; only the hash survives.
        let password_hash = self.hasher.hash(&request.password)?;

        let role = self
            .roles
            .get_or_create(&self.default_role, UserRole::describe(&self.default_role))
            .await?;

        let mut account = Account::new(
            request.username,
            request.email,
            password_hash,
            request.first_name,
            request.last_name,
            request.phone,
        );
        account.roles.insert(role);

        match self.accounts.save(account).await {
            Ok(saved) => {
                info!("registered account {} ({})", saved.username, saved.id);
                Ok(saved)
            }
            // A concurrent registration can slip past the pre-checks; the
            // store's unique constraint is the real arbiter and its
            // violation still reports as a duplicate, not a generic failure.
            Err(AppError::DatabaseError(DatabaseError::UniqueViolation(constraint))) => {
                if constraint.contains("email") {
                    Err(RegistrationError::DuplicateEmail.into())
                } else {
                    Err(RegistrationError::DuplicateUsername.into())
                }
            }
            Err(e) => Err(e),
        }
    }
}
