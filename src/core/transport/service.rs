//! Transport service - runs the server on its transport.

use tracing::info;

use super::TransportResult;
use super::stdio::StdioTransport;
use crate::core::McpServer;

/// Transport service - manages the transport layer for the MCP server.
#[derive(Debug, Default)]
pub struct TransportService;

impl TransportService {
    pub fn new() -> Self {
        Self
    }

    /// Start the transport with the given MCP server.
    ///
    /// This method blocks until the client disconnects.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!("Starting transport: stdio");
        StdioTransport::run(server).await
    }
}
