//! Error types and handling for the MCP server.
//!
//! Provider failures are normally rendered into tool results; this type
//! covers what can fail around them: startup configuration and dispatch.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the maps core.
    #[error("Maps error: {0}")]
    Maps(#[from] crate::domains::maps::MapsError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::maps::MapsError;
    use crate::domains::tools::ToolError;

    #[test]
    fn test_error_conversions() {
        let err: Error = ToolError::not_found("x").into();
        assert_eq!(err.to_string(), "Tool error: Tool not found: x");

        let err: Error = MapsError::internal("boom").into();
        assert!(matches!(err, Error::Maps(_)));
    }
}
