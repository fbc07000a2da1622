//! Login and registration credentials.
//!
//! Keep payload parsing out of the account logic by exposing a constructor
//! that validates the raw strings before anything talks to the store.

use zeroize::Zeroizing;

use crate::error::ValidationError;

/// Validated username/password pair.
///
/// ## Invariants
/// - `username` is stored exactly as sent and is not blank.
/// - `password` is non-empty and keeps caller-provided whitespace so that
///   credential checks are not surprising.
/// - `password` is wiped from memory when the value is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Build credentials from raw request strings.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, ValidationError> {
        if username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for lookups and uniqueness.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password exactly as the caller supplied it.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
