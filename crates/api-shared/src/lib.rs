//! # API Shared
//!
//! Shared wire types for the certificate APIs.
//!
//! Contains:
//! - Response bodies serialised as JSON (`responses` module), with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and by anything else that needs to speak the same JSON.

pub mod health;
pub mod responses;

pub use health::{HealthRes, HealthService};
pub use responses::ErrorRes;
