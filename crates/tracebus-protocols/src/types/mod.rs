//! Data model shared between handlers, the registry and the adapter layer.

mod entry;
mod mapping;
mod network;

pub use entry::*;
pub use mapping::*;
pub use network::*;
