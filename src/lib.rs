//! Google Maps MCP Server Library
//!
//! Exposes Google Maps Platform operations (geocoding, places, routes,
//! elevation, time zones, geolocation and roads) as Model Context Protocol
//! tools.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transport
//! - **domains**: business logic organized by bounded contexts
//!   - **maps**: request executor (cache, rate limiter, retry, error
//!     classification), response normalizers and the typed client
//!   - **tools**: MCP tools that can be executed by clients
//!   - **resources**: reference data that can be read by clients
//!
//! # Example
//!
//! ```rust,no_run
//! use maps_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
