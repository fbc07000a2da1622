//! # Error Types
//!
//! Structured errors for input validation and password hashing, built with
//! `thiserror`.

use thiserror::Error;

/// Validation failure for a domain input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username was missing or only whitespace.
    #[error("username must not be empty")]
    EmptyUsername,

    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// Registration plate was missing or blank once trimmed.
    #[error("registration must not be empty")]
    EmptyRegistration,

    /// An identifier was not a positive integer.
    #[error("invalid {kind} id: {value}")]
    InvalidId {
        /// Which identifier kind was being parsed.
        kind: &'static str,
        /// The rejected raw value.
        value: i64,
    },
}

/// Failure while hashing or checking a password.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Argon2 could not produce a hash.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// The stored hash is not a valid PHC string.
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_message_names_kind_and_value() {
        let err = ValidationError::InvalidId {
            kind: "vehicle",
            value: -3,
        };
        assert_eq!(err.to_string(), "invalid vehicle id: -3");
    }

    #[test]
    fn password_error_display() {
        let err = PasswordError::MalformedHash("bad".into());
        assert!(err.to_string().contains("malformed"));
    }
}
