//! # API Shared
//!
//! Shared request/response types for the ccm APIs.
//!
//! Contains:
//! - JSON DTOs with OpenAPI schemas (`dto` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the workspace's `ccm-run` binary.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
