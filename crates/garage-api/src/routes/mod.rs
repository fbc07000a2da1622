//! # API Route Modules
//!
//! - `accounts`: registration and login (public).
//! - `vehicles`: owner-scoped vehicle CRUD (session required).
//! - `mot`: registry status lookup with optional write-back (session required).

pub mod accounts;
pub mod mot;
pub mod vehicles;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic success body: `{"message": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
