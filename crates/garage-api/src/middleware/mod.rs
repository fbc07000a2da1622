//! # Middleware
//!
//! Tower layers wrapped around the whole router. Session authentication
//! lives in [`crate::auth`] since it only guards part of the API.

pub mod cors;
pub mod tracing_layer;
