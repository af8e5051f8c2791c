//! Tools domain module.
//!
//! Tools are the callable surface of the server. Each one translates
//! caller-friendly arguments into a maps client call and renders the result.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - rmcp ToolRouter builder
//! - `registry.rs` - Tool metadata and name-based dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in the matching `definitions/` group
//! 2. Define params, `execute()`, `to_tool()` and `create_route()`
//! 3. Export it from `definitions/mod.rs`
//! 4. Add its route in `router.rs` and its dispatch arm in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
