//! # tracebus API
//!
//! Adapter layer between remote debugging clients and the [`Tracer`].
//!
//! Handlers translate requests into registry calls and results into reply
//! shapes; they carry no registry logic of their own.
//!
//! ```text
//! client ──HTTP/JSON──▶ http::handlers ──▶ Tracer ──▶ TraceHandler
//!        ◀─NDJSON stream── ExecutionStream ◀── MessageSink ◀─┘
//! ```
//!
//! [`Tracer`]: tracebus_core::Tracer

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ErrorResponse;
pub use http::handlers::{
    ExecuteReply, ExecuteRequest, ResourceConfigReply, ResourceMappingReply, ResourceNamesReply,
    ResourceTraceReply, ResourceTypesReply,
};
pub use http::routes::create_router;
pub use server::ApiServer;
pub use state::AppState;
