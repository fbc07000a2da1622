#![deny(missing_docs)]

//! # garage-core: Foundational Types for the Garage Service
//!
//! Types shared by every crate in the workspace. No internal crate
//! dependencies; only `serde`, `thiserror`, `zeroize`, `argon2` and `utoipa`
//! (schema derivations) from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** A [`UserId`] cannot be passed
//!    where a [`VehicleId`] is expected.
//!
//! 2. **Validated inputs.** [`Credentials`] can only be built through a
//!    constructor that rejects blank usernames and empty passwords; the
//!    password is zeroized on drop.
//!
//! 3. **Passwords never at rest in plaintext.** [`password::hash_password`]
//!    produces a salted Argon2id PHC string and
//!    [`password::verify_password`] checks it in constant time.

pub mod credentials;
pub mod error;
pub mod identity;
pub mod password;
pub mod vehicle;

pub use credentials::Credentials;
pub use error::{PasswordError, ValidationError};
pub use identity::{UserId, VehicleId};
pub use vehicle::{InspectionStatus, VehicleDetails};
