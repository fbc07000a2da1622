//! # Session Tokens
//!
//! HS256 JWTs carrying the numeric user id. Tokens are valid for
//! [`SESSION_TTL_SECS`] from issuance; there is no refresh or revocation.
//!
//! ```text
//! { "user_id": 7, "iat": 1700000000, "exp": 1700086400 }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use garage_core::UserId;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session lifetime: 24 hours.
pub const SESSION_TTL_SECS: i64 = 86_400;

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no session token supplied")]
    MissingToken,

    #[error("session token rejected: {0}")]
    InvalidToken(String),

    #[error("failed to sign session token: {0}")]
    Signing(String),
}

/// Signing and verification keys for session tokens.
///
/// Cheap to clone. Custom `Debug` never prints key material.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<KeyPair>,
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("algorithm", &"HS256")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl SessionKeys {
    /// Build keys from a shared secret.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            inner: Arc::new(KeyPair {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation,
            }),
        }
    }

    /// Issue a token for `user` valid from now.
    pub fn issue(&self, user: UserId) -> Result<String, SessionError> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token for `user` as if issued at `issued_at`.
    pub fn issue_at(&self, user: UserId, issued_at: DateTime<Utc>) -> Result<String, SessionError> {
        let iat = issued_at.timestamp();
        let claims = SessionClaims {
            user_id: user.get(),
            iat,
            exp: iat + SESSION_TTL_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.inner.encoding)
            .map_err(|e| SessionError::Signing(e.to_string()))
    }

    /// Check signature and expiry and return the claims.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, SessionError> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.inner.decoding, &self.inner.validation)
            .map(|data| data.claims)
            .map_err(|e| SessionError::InvalidToken(e.to_string()))
    }

    /// Resolve a token to the user it was issued for.
    pub fn verify(&self, token: &str) -> Result<UserId, SessionError> {
        if token.is_empty() {
            return Err(SessionError::MissingToken);
        }
        let claims = self.decode(token)?;
        UserId::new(claims.user_id).map_err(|e| SessionError::InvalidToken(e.to_string()))
    }
}
