//! # tracebus Protocols
//!
//! Capability traits and data model shared by everything that plugs into the
//! tracebus registry. Contains only interface definitions - no registry logic.
//!
//! ## Core Traits
//!
//! - [`TraceHandler`] - Implemented by every traceable resource (daemon, pool, factory, ...)
//! - [`ResourceMappingHandler`] - Produces the pod-to-resource mapping on demand
//!
//! ## Data Model
//!
//! - [`MapKeyValueEntry`] - Ordered key/value pairs returned by `config` and `trace`
//! - [`PodResourceMapping`], [`ResourceMapping`], [`FactoryResourceMapping`] - The
//!   three views of a pod's claim on a network resource
//! - [`MessageSink`] - Producer end of a command execution stream

pub mod error;
pub mod handler;
pub mod resource_type;
pub mod sink;
pub mod types;

pub use error::TracingError;
pub use handler::{ResourceMappingHandler, TraceHandler};
pub use sink::MessageSink;
pub use types::*;
