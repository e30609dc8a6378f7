use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::db::models::{Account, AccountStatus};
use crate::error::{AppError, TokenError};

/// Claims carried by every issued token. Custom claim keys use camelCase to
/// stay wire-compatible with existing consumers; unknown extra claims are
/// ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub status: AccountStatus,
    pub roles: BTreeSet<String>,
}

/// Signs, verifies and decodes bearer tokens (HMAC-SHA256).
///
/// Stateless by design: validity is determined purely by signature and
/// expiry, so there is no server-side token record and no revocation list.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    expiry: Duration,
}

impl JwtService {
    /// Fails with `TokenError::WeakSecret` when the configured secret is
    /// shorter than 32 bytes. A short HMAC key materially weakens the
    /// signature, so this is a startup precondition rather than a
    /// recoverable runtime error.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.jwt_secret.len() < 32 {
            return Err(TokenError::WeakSecret.into());
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            expiry: Duration::milliseconds(config.token_expiry_millis),
        })
    }

    /// Builds and signs a token from an account snapshot. Pure function of
    /// the account, the configuration and the current time.
    pub fn issue(&self, account: &Account) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: account.username.clone(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
            user_id: account.id,
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            status: account.status,
            roles: account.role_names(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("failed to sign token: {}", e)))
    }

    /// Verifies the signature and expiry, then returns the decoded claims.
    /// A token is expired once `exp <= now` (inclusive boundary).
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(map_jwt_error)?;

        // jsonwebtoken treats exp == now as still valid; the contract here
        // counts the boundary second as expired.
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired.into());
        }

        Ok(data.claims)
    }

    /// Subject (username) of a verified token.
    pub fn extract_subject(&self, token: &str) -> Result<String, AppError> {
        Ok(self.verify(token)?.sub)
    }

    /// Expiry timestamp of a verified token.
    pub fn extract_expiry(&self, token: &str) -> Result<DateTime<Utc>, AppError> {
        let claims = self.verify(token)?;
        DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| TokenError::Malformed.into())
    }

    /// True iff the token verifies, its subject equals `expected_username`
    /// and its expiry is in the future.
    pub fn matches_identity(&self, token: &str, expected_username: &str) -> bool {
        match self.verify(token) {
            Ok(claims) => {
                claims.sub == expected_username && claims.exp > Utc::now().timestamp()
            }
            Err(_) => false,
        }
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AppError {
    use jsonwebtoken::errors::ErrorKind;

    let kind = match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        _ => TokenError::Malformed,
    };
    kind.into()
}
