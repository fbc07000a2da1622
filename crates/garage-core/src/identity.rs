//! # Identity Newtypes
//!
//! Integer identifiers assigned by the relational store. Each identifier is
//! a distinct type.
//!
//! ## Validation
//!
//! Identifiers arriving from clients (path segments, request bodies) go
//! through `new`, which rejects zero and negative values. Identifiers read
//! back from the store use `from_db`, since the store only ever assigns
//! positive row ids.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Validate a client-supplied user id.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::InvalidId {
                kind: "user",
                value,
            });
        }
        Ok(Self(value))
    }

    /// Wrap a row id assigned by the store.
    pub fn from_db(value: i64) -> Self {
        Self(value)
    }

    /// Access the underlying integer.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a vehicle record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(i64);

impl VehicleId {
    /// Validate a client-supplied vehicle id.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::InvalidId {
                kind: "vehicle",
                value,
            });
        }
        Ok(Self(value))
    }

    /// Wrap a row id assigned by the store.
    pub fn from_db(value: i64) -> Self {
        Self(value)
    }

    /// Access the underlying integer.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
