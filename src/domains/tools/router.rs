//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; the router only collects
//! them around one shared maps client.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::maps::MapsClient;

use super::definitions::{
    ElevationGetTool, GeocodeReverseTool, GeocodeSearchTool, GeolocationEstimateTool,
    IpGeolocateTool, NearbyFindTool, PlacesAutocompleteTool, PlacesDetailsTool, PlacesNearbyTool,
    PlacesPhotosTool, PlacesSearchTextTool, RoadsNearestTool, RoutesComputeTool, RoutesMatrixTool,
    TimezoneGetTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<MapsClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GeocodeSearchTool::create_route(client.clone()))
        .with_route(GeocodeReverseTool::create_route(client.clone()))
        .with_route(PlacesSearchTextTool::create_route(client.clone()))
        .with_route(PlacesNearbyTool::create_route(client.clone()))
        .with_route(PlacesAutocompleteTool::create_route(client.clone()))
        .with_route(PlacesDetailsTool::create_route(client.clone()))
        .with_route(PlacesPhotosTool::create_route(client.clone()))
        .with_route(RoutesComputeTool::create_route(client.clone()))
        .with_route(RoutesMatrixTool::create_route(client.clone()))
        .with_route(ElevationGetTool::create_route(client.clone()))
        .with_route(TimezoneGetTool::create_route(client.clone()))
        .with_route(GeolocationEstimateTool::create_route(client.clone()))
        .with_route(RoadsNearestTool::create_route(client.clone()))
        .with_route(NearbyFindTool::create_route(client.clone()))
        .with_route(IpGeolocateTool::create_route(client))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::maps::{EndpointConfig, HttpConfig, RateLimitConfig, RequestExecutor};

    struct TestServer {}

    fn test_client() -> Arc<MapsClient> {
        let executor = RequestExecutor::new(
            "test-key",
            &HttpConfig::default(),
            &RateLimitConfig::default(),
            EndpointConfig::default(),
        )
        .unwrap();
        Arc::new(MapsClient::new(executor))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_client());
        let tools = router.list_all();
        assert_eq!(tools.len(), 15);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"geocode_reverse"));
        assert!(names.contains(&"places_search_text"));
        assert!(names.contains(&"routes_compute"));
        assert!(names.contains(&"elevation_get"));
        assert!(names.contains(&"roads_nearest"));
    }

    #[test]
    fn test_registry_matches_router() {
        let client = test_client();
        let registry = ToolRegistry::new(client.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(client);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
