use std::sync::Arc;

use tracing::debug;

use crate::auth::password::PasswordHasher;
use crate::db::models::Account;
use crate::db::AccountStore;
use crate::error::{AppError, AuthError};

/// Checks a username/password pair against the account store.
///
/// Unknown username and wrong password map to the same externally visible
/// `InvalidCredentials` error so callers cannot probe which usernames exist.
/// The internal cause is only ever logged at debug level.
pub struct CredentialVerifier {
    accounts: Arc<dyn AccountStore>,
    hasher: Arc<dyn PasswordHasher>,
}

// Well-formed bcrypt hash verified against when the username is unknown, so
// the absent-user path costs a hash check just like a password mismatch and
// response timing does not reveal whether the account exists. The result is
// always discarded.
const DUMMY_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

impl CredentialVerifier {
    pub fn new(accounts: Arc<dyn AccountStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { accounts, hasher }
    }

    /// Returns the full account snapshot (roles included) on success, for
    /// downstream token issuance. No account state is mutated.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Account, AppError> {
        let account = match self.accounts.find_by_username(username).await? {
            Some(account) => account,
            None => {
                let _ = self.hasher.verify(password, DUMMY_HASH);
                debug!("login rejected: unknown username");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.hasher.verify(password, &account.password_hash) {
            debug!("login rejected: password mismatch for {}", username);
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(account)
    }
}
