//! Domains module containing business logic organized by bounded contexts.
//!
//! - **maps**: the provider request core and typed operations
//! - **tools**: MCP tools that wrap the maps operations
//! - **resources**: static reference documents

pub mod maps;
pub mod resources;
pub mod tools;
