//! # tracebus Core
//!
//! The registry behind the tracebus introspection bus.
//!
//! ## Components
//!
//! - [`Tracer`] - `(type, name)` keyed registry of [`TraceHandler`]s
//! - [`ExecutionStream`] - Consumer side of a running diagnostic command
//! - [`classify`] / [`MappingRecord`] - Pod-to-resource mapping health
//! - [`default_tracer`] - Process-lifetime convenience instance
//!
//! [`TraceHandler`]: tracebus_protocols::TraceHandler

pub mod execute;
pub mod global;
pub mod mapping;
pub mod tracer;

pub use execute::ExecutionStream;
pub use global::{default_tracer, register, register_resource_mapping, unregister};
pub use mapping::{classify, MappingRecord};
pub use tracer::Tracer;
