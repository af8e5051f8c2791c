//! Resource service implementation.
//!
//! The ResourceService lists the registered resources and serves reads.
//! Resources are defined in `definitions/` and registered via `registry.rs`.

use std::collections::BTreeMap;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use serde_json::Value;
use tracing::{debug, info};

use super::error::ResourceError;
use super::registry::get_all_resources;

/// Service for listing and reading resources.
pub struct ResourceService {
    /// Key: resource URI
    resources: BTreeMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    pub resource: Resource,
    pub content: ResourceContent,
}

/// Static resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    Text(String),
    /// Served pretty-printed.
    Json(Value),
}

impl ResourceService {
    pub fn new() -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            resources: BTreeMap::new(),
        };
        for entry in get_all_resources() {
            service.register_resource(entry);
        }
        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let text = match &entry.content {
            ResourceContent::Text(text) => text.clone(),
            ResourceContent::Json(value) => serde_json::to_string_pretty(value)
                .map_err(|e| ResourceError::internal(e.to_string()))?,
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: entry.resource.raw.mime_type.clone(),
                text,
                meta: None,
            }],
        })
    }
}

impl Default for ResourceService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resource_service_creation() {
        let service = ResourceService::new();
        let resources = service.list_resources().await;
        assert_eq!(resources.len(), 5);
    }

    #[tokio::test]
    async fn test_read_markdown_resource() {
        let service = ResourceService::new();
        let result = service
            .read_resource("google-maps://docs/api-overview")
            .await
            .unwrap();

        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, mime_type, .. } => {
                assert!(text.starts_with("# Google Maps Platform APIs"));
                assert_eq!(mime_type.as_deref(), Some("text/markdown"));
            }
            other => panic!("unexpected contents: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_json_resource_is_pretty() {
        let service = ResourceService::new();
        let result = service
            .read_resource("google-maps://docs/travel-modes")
            .await
            .unwrap();

        let ResourceContents::TextResourceContents { text, .. } = &result.contents[0] else {
            panic!("expected text contents");
        };
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["WALK"]["supports_traffic"], Value::Bool(false));
        assert!(text.contains('\n'));
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let service = ResourceService::new();
        let result = service.read_resource("google-maps://docs/unknown").await;
        assert!(matches!(result, Err(ResourceError::NotFound(uri)) if uri == "google-maps://docs/unknown"));
    }
}
