//! Persistence seams for accounts and roles.
//!
//! The auth core talks to storage through these traits; the Postgres
//! implementation lives in `postgres`. Tests substitute mocks or an
//! in-memory store.

pub mod models;
pub mod postgres;

use crate::error::AppError;
use async_trait::async_trait;

pub use models::{Account, AccountStatus, Role, UserRole};
pub use postgres::PgStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;

    /// Persists a new account with its role set in one transaction. A unique
    /// violation detected at save time surfaces as
    /// `DatabaseError::UniqueViolation` carrying the constraint name.
    async fn save(&self, account: Account) -> Result<Account, AppError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError>;

    /// Atomic find-or-insert keyed on the unique role name. Concurrent
    /// callers racing on the same name all observe the same row.
    async fn get_or_create(&self, name: &str, description: &str) -> Result<Role, AppError>;
}
