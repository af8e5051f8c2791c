//! Transport layer for the MCP server.
//!
//! The server speaks MCP over standard input/output. Logs go to stderr so
//! they never interleave with protocol messages.

mod error;
mod service;
mod stdio;

pub use error::{TransportError, TransportResult};
pub use service::TransportService;
