use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::domains::maps::{Coordinate, MapsClient, NearbySearchOptions};
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlacesNearbyParams {
    /// Center of the search circle
    pub location: Coordinate,
    /// Search radius in meters, up to 50000
    pub radius_meters: f64,
    /// Place types to include, e.g. ["cafe", "bakery"]
    pub included_types: Option<Vec<String>>,
    pub max_results: Option<u32>,
    pub language: Option<String>,
    pub region: Option<String>,
}

pub struct PlacesNearbyTool;

impl PlacesNearbyTool {
    pub const NAME: &'static str = "places_nearby";

    pub const DESCRIPTION: &'static str = "Find places within a radius of a coordinate, optionally filtered by place type.";

    #[instrument(skip_all, fields(radius_meters = params.radius_meters))]
    pub async fn execute(params: &PlacesNearbyParams, client: &MapsClient) -> CallToolResult {
        info!("Places nearby tool called");
        let options = NearbySearchOptions {
            included_types: params.included_types.clone().unwrap_or_default(),
            max_results: params.max_results,
            language: params.language.clone(),
            region: params.region.clone(),
        };

        let outcome = client
            .places_nearby(params.location, params.radius_meters, &options)
            .await
            .map(|results| json!({ "results": results }));

        render(outcome, |value| {
            let count = value["results"].as_array().map_or(0, Vec::len);
            format!(
                "Found {count} place(s) within {}m of {},{}",
                params.radius_meters, params.location.lat, params.location.lng
            )
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<PlacesNearbyParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: PlacesNearbyParams| async move {
            Self::execute(&params, &client).await
        })
    }
}
