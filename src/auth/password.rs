use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::warn;

use crate::error::AppError;

/// One-way, salted password hashing.
///
/// `verify` returns plain `bool`: a stored hash that cannot be parsed is
/// treated as a non-match so callers see the same failure shape as a wrong
/// password.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, AppError>;

    fn verify(&self, plaintext: &str, hashed: &str) -> bool;
}

pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        hash(plaintext, self.cost)
            .map_err(|e| AppError::InternalError(format!("password hashing failed: {}", e)))
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        match verify(plaintext, hashed) {
            Ok(matched) => matched,
            Err(e) => {
                warn!("stored password hash could not be verified: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost; keeps these tests fast while production uses
    // DEFAULT_COST.
    const TEST_COST: u32 = 4;

    fn hasher() -> BcryptHasher {
        BcryptHasher::new(TEST_COST)
    }

    #[test]
    fn test_low_cost_is_accepted() {
        // The crate exports only DEFAULT_COST; explicit numeric costs must
        // keep working for test configurations.
        let hashed = BcryptHasher::new(TEST_COST).hash("password123").unwrap();
        assert!(hashed.starts_with("$2"));
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hashed = hasher.hash("password123").unwrap();

        assert_ne!(hashed, "password123");
        assert!(hasher.verify("password123", &hashed));
        assert!(!hasher.verify("wrong_password", &hashed));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash("password123").unwrap();
        let second = hasher.hash("password123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_garbage_hash_is_non_match() {
        let hasher = hasher();
        assert!(!hasher.verify("password123", "not-a-bcrypt-hash"));
    }
}
