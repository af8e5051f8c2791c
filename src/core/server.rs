//! MCP Server implementation and lifecycle management.
//!
//! The server owns one maps client, shared by every tool route, and
//! delegates resource requests to the resource service.
//!
//! The ToolRouter is built in `domains/tools/router.rs`; adding a tool does
//! not require modifying this file.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::{Config, MapsConfig};
use super::error::{self, Error};
use crate::domains::{
    maps::{MapsClient, RequestExecutor},
    resources::ResourceService,
    tools::{ToolRegistry, build_tool_router},
};

const INSTRUCTIONS: &str = "Google Maps Platform tools: geocoding, place search and details, \
routes and route matrices, elevation, time zones, geolocation, road snapping, nearby discovery \
and IP geolocation. Locations are given as {\"lat\", \"lng\"} or {\"address\"}. Failures are \
returned as {\"error\": {\"code\", \"message\", \"context\"}}. Reference material is available \
as resources under google-maps://.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,

    /// Shared by every tool route.
    client: Arc<MapsClient>,

    resource_service: Arc<ResourceService>,

    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails when no API key is configured.
    pub fn new(config: Config) -> error::Result<Self> {
        let client = Arc::new(build_client(&config.maps)?);
        Ok(Self::with_client(config, client))
    }

    /// Create a server around an existing maps client.
    pub fn with_client(config: Config, client: Arc<MapsClient>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(client.clone()),
            config: Arc::new(config),
            client,
            resource_service: Arc::new(ResourceService::new()),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn client(&self) -> &Arc<MapsClient> {
        &self.client
    }

    /// Metadata for every routed tool.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// Call a tool by name outside of the protocol loop.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> error::Result<CallToolResult> {
        let result = ToolRegistry::new(self.client.clone())
            .call_tool(name, arguments)
            .await?;
        Ok(result)
    }
}

/// Build the maps client from configuration.
pub fn build_client(config: &MapsConfig) -> error::Result<MapsClient> {
    let api_key = config
        .credentials
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| Error::config("GOOGLE_MAPS_API_KEY is required"))?;

    let executor = RequestExecutor::new(
        api_key,
        &config.http,
        &config.rate_limit,
        config.endpoints.clone(),
    )?;
    Ok(MapsClient::new(executor))
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}
