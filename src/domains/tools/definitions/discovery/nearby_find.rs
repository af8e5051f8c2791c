//! Proximity discovery: places around an address or coordinate, nearest first.

use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::maps::{LocationRef, MapsClient, NearbyFindRequest, NearbyTarget};
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NearbyFindParams {
    /// Where to search from: `{lat, lng}` or `{address}`
    pub origin: LocationRef,
    /// cities, towns, pois or custom
    pub what: NearbyTarget,
    /// Place types for `pois` and `custom`, e.g. ["gas_station"]
    pub included_types: Option<Vec<String>>,
    /// Search radius in meters. Defaults to 30000.
    pub radius_meters: Option<f64>,
    /// Defaults to 20.
    pub max_results: Option<u32>,
    pub language: Option<String>,
    pub region: Option<String>,
}

impl From<&NearbyFindParams> for NearbyFindRequest {
    fn from(params: &NearbyFindParams) -> Self {
        Self {
            origin: params.origin.clone(),
            what: params.what,
            included_types: params.included_types.clone(),
            radius_meters: params.radius_meters,
            max_results: params.max_results,
            language: params.language.clone(),
            region: params.region.clone(),
        }
    }
}

pub struct NearbyFindTool;

impl NearbyFindTool {
    pub const NAME: &'static str = "nearby_find";

    pub const DESCRIPTION: &'static str = "Discover nearby cities, towns or points of interest from an address or coordinate. Distances are computed from the origin and results are sorted nearest first.";

    #[instrument(skip_all, fields(what = ?params.what))]
    pub async fn execute(params: &NearbyFindParams, client: &MapsClient) -> CallToolResult {
        info!("Nearby find tool called");
        let outcome = client.nearby_find(&NearbyFindRequest::from(params)).await;

        render(outcome, |found| match found.results.first() {
            Some(nearest) => format!(
                "Found {} place(s); nearest is {} at {}m",
                found.results.len(),
                nearest.name,
                nearest.distance_meters
            ),
            None => "No places found nearby".to_string(),
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<NearbyFindParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: NearbyFindParams| async move {
            Self::execute(&params, &client).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_from_params() {
        let params: NearbyFindParams = serde_json::from_value(json!({
            "origin": {"address": "Lyon, France"},
            "what": "towns",
            "radius_meters": 5000.0
        }))
        .unwrap();

        let request = NearbyFindRequest::from(&params);
        assert_eq!(request.what, NearbyTarget::Towns);
        assert_eq!(request.radius_meters, Some(5000.0));
        assert!(request.max_results.is_none());
    }

    #[test]
    fn test_unknown_target_rejected() {
        let result = serde_json::from_value::<NearbyFindParams>(json!({
            "origin": {"lat": 1.0, "lng": 2.0},
            "what": "villages"
        }));
        assert!(result.is_err());
    }
}
