//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry is the single source of truth for tool metadata and offers a
//! name-based dispatch path alongside the rmcp router.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;
use tracing::warn;

use crate::domains::maps::MapsClient;

use super::ToolError;
use super::definitions::common::parse_arguments;
use super::definitions::{
    ElevationGetTool, GeocodeReverseTool, GeocodeSearchTool, GeolocationEstimateTool,
    IpGeolocateTool, NearbyFindTool, PlacesAutocompleteTool, PlacesDetailsTool, PlacesNearbyTool,
    PlacesPhotosTool, PlacesSearchTextTool, RoadsNearestTool, RoutesComputeTool, RoutesMatrixTool,
    TimezoneGetTool,
};

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    client: Arc<MapsClient>,
}

impl ToolRegistry {
    pub fn new(client: Arc<MapsClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GeocodeSearchTool::NAME,
            GeocodeReverseTool::NAME,
            PlacesSearchTextTool::NAME,
            PlacesNearbyTool::NAME,
            PlacesAutocompleteTool::NAME,
            PlacesDetailsTool::NAME,
            PlacesPhotosTool::NAME,
            RoutesComputeTool::NAME,
            RoutesMatrixTool::NAME,
            ElevationGetTool::NAME,
            TimezoneGetTool::NAME,
            GeolocationEstimateTool::NAME,
            RoadsNearestTool::NAME,
            NearbyFindTool::NAME,
            IpGeolocateTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            GeocodeSearchTool::to_tool(),
            GeocodeReverseTool::to_tool(),
            PlacesSearchTextTool::to_tool(),
            PlacesNearbyTool::to_tool(),
            PlacesAutocompleteTool::to_tool(),
            PlacesDetailsTool::to_tool(),
            PlacesPhotosTool::to_tool(),
            RoutesComputeTool::to_tool(),
            RoutesMatrixTool::to_tool(),
            ElevationGetTool::to_tool(),
            TimezoneGetTool::to_tool(),
            GeolocationEstimateTool::to_tool(),
            RoadsNearestTool::to_tool(),
            NearbyFindTool::to_tool(),
            IpGeolocateTool::to_tool(),
        ]
    }

    /// Dispatch a tool call by name.
    ///
    /// Maps failures are rendered into the returned result with `is_error`
    /// set; only unknown tools and malformed arguments are `Err`.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<CallToolResult, ToolError> {
        let client = self.client.as_ref();
        let result = match name {
            GeocodeSearchTool::NAME => {
                GeocodeSearchTool::execute(&parse_arguments(arguments)?, client).await
            }
            GeocodeReverseTool::NAME => {
                GeocodeReverseTool::execute(&parse_arguments(arguments)?, client).await
            }
            PlacesSearchTextTool::NAME => {
                PlacesSearchTextTool::execute(&parse_arguments(arguments)?, client).await
            }
            PlacesNearbyTool::NAME => {
                PlacesNearbyTool::execute(&parse_arguments(arguments)?, client).await
            }
            PlacesAutocompleteTool::NAME => {
                PlacesAutocompleteTool::execute(&parse_arguments(arguments)?, client).await
            }
            PlacesDetailsTool::NAME => {
                PlacesDetailsTool::execute(&parse_arguments(arguments)?, client).await
            }
            PlacesPhotosTool::NAME => {
                PlacesPhotosTool::execute(&parse_arguments(arguments)?, client).await
            }
            RoutesComputeTool::NAME => {
                RoutesComputeTool::execute(&parse_arguments(arguments)?, client).await
            }
            RoutesMatrixTool::NAME => {
                RoutesMatrixTool::execute(&parse_arguments(arguments)?, client).await
            }
            ElevationGetTool::NAME => {
                ElevationGetTool::execute(&parse_arguments(arguments)?, client).await
            }
            TimezoneGetTool::NAME => {
                TimezoneGetTool::execute(&parse_arguments(arguments)?, client).await
            }
            GeolocationEstimateTool::NAME => {
                GeolocationEstimateTool::execute(&parse_arguments(arguments)?, client).await
            }
            RoadsNearestTool::NAME => {
                RoadsNearestTool::execute(&parse_arguments(arguments)?, client).await
            }
            NearbyFindTool::NAME => {
                NearbyFindTool::execute(&parse_arguments(arguments)?, client).await
            }
            IpGeolocateTool::NAME => {
                IpGeolocateTool::execute(&parse_arguments(arguments)?, client).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::not_found(name));
            }
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::maps::{EndpointConfig, HttpConfig, RateLimitConfig, RequestExecutor};
    use serde_json::json;

    fn test_registry() -> ToolRegistry {
        let executor = RequestExecutor::new(
            "test-key",
            &HttpConfig::default(),
            &RateLimitConfig::default(),
            EndpointConfig::single_host("http://127.0.0.1:9"),
        )
        .unwrap();
        ToolRegistry::new(Arc::new(MapsClient::new(executor)))
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = test_registry();
        let names = registry.tool_names();
        assert_eq!(names.len(), 15);
        assert!(names.contains(&"geocode_search"));
        assert!(names.contains(&"places_photos"));
        assert!(names.contains(&"routes_matrix"));
        assert!(names.contains(&"nearby_find"));
        assert!(names.contains(&"ip_geolocate"));
    }

    #[test]
    fn test_all_tools_have_object_schemas() {
        for tool in ToolRegistry::get_all_tools() {
            assert_eq!(
                tool.input_schema.get("type"),
                Some(&json!("object")),
                "{} schema is not an object",
                tool.name
            );
            assert!(tool.description.is_some());
        }
    }

    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = test_registry();
        let result = registry.call_tool("unknown", json!({})).await;
        assert!(matches!(result, Err(ToolError::NotFound(name)) if name == "unknown"));
    }

    #[tokio::test]
    async fn test_registry_call_bad_arguments() {
        let registry = test_registry();
        let result = registry.call_tool("geocode_reverse", json!({"lat": "north"})).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[tokio::test]
    async fn test_registry_call_photo_without_network() {
        let registry = test_registry();
        let result = registry
            .call_tool("places_photos", json!({"photo_reference": "ref1", "max_width": 400}))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        let url = result.structured_content.unwrap()["photo_url"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(url.starts_with("http://127.0.0.1:9/place/photo?"));
        assert!(url.contains("maxwidth=400"));
    }

    #[tokio::test]
    async fn test_registry_renders_validation_errors() {
        let registry = test_registry();
        let result = registry
            .call_tool("ip_geolocate", json!({"ip_override": "192.168.1.1"}))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.structured_content.unwrap()["error"]["code"],
            json!("INVALID_IP")
        );
    }
}
