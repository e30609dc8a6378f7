use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::auth::jwt::{Claims, JwtService};
use crate::auth::password::PasswordHasher;
use crate::auth::registrar::{Registrar, RegistrationRequest};
use crate::auth::verifier::CredentialVerifier;
use crate::db::{AccountStore, RoleStore};
use crate::error::AppError;

/// Facade over the credential verifier, the registrar and the token engine.
/// Every failure propagates unchanged; no token is ever issued on a failed
/// authentication or registration.
pub struct AuthService {
    verifier: CredentialVerifier,
    registrar: Registrar,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        roles: Arc<dyn RoleStore>,
        hasher: Arc<dyn PasswordHasher>,
        jwt: JwtService,
        default_role: String,
    ) -> Self {
        Self {
            verifier: CredentialVerifier::new(accounts.clone(), hasher.clone()),
            registrar: Registrar::new(accounts, roles, hasher, default_role),
            jwt,
        }
    }

    /// Verifies the credentials and issues a token for the account.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let account = self.verifier.authenticate(username, password).await?;
        let token = self.jwt.issue(&account)?;
        info!("user authenticated successfully: {}", account.username);
        Ok(token)
    }

    /// Registers the account and issues a token for it.
    pub async fn sign_up(&self, request: RegistrationRequest) -> Result<String, AppError> {
        let account = self.registrar.register(request).await?;
        self.jwt.issue(&account)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        self.jwt.verify(token)
    }

    pub fn extract_subject(&self, token: &str) -> Result<String, AppError> {
        self.jwt.extract_subject(token)
    }

    pub fn extract_expiry(&self, token: &str) -> Result<DateTime<Utc>, AppError> {
        self.jwt.extract_expiry(token)
    }

    pub fn matches_identity(&self, token: &str, expected_username: &str) -> bool {
        self.jwt.matches_identity(token, expected_username)
    }
}
