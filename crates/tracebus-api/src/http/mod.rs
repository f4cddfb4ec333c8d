//! HTTP interface module.
//!
//! Provides endpoints for:
//! - Resource type and name enumeration
//! - Static config and runtime trace of one resource
//! - Streaming command execution
//! - Pod-to-resource mapping health

pub mod handlers;
pub mod routes;
