//! Authentication core: token issuance and verification, credential
//! checking, and account registration with default role assignment.

pub mod handlers;
mod jwt;
mod password;
mod registrar;
mod service;
mod verifier;

pub use jwt::{Claims, JwtService};
pub use password::{BcryptHasher, PasswordHasher};
pub use registrar::{Registrar, RegistrationRequest};
pub use service::AuthService;
pub use verifier::CredentialVerifier;
