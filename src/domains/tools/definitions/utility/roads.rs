use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::maps::{Coordinate, MapsClient, RoadsTravelMode};
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RoadsNearestParams {
    /// Points to snap to the nearest road segment
    pub points: Vec<Coordinate>,
    /// DRIVING, WALKING or BICYCLING
    pub travel_mode: Option<RoadsTravelMode>,
}

/// Nearest road segments for a set of points.
pub struct RoadsNearestTool;

impl RoadsNearestTool {
    pub const NAME: &'static str = "roads_nearest";

    pub const DESCRIPTION: &'static str = "Find the nearest road segment for each of the given points.";

    #[instrument(skip_all, fields(points = params.points.len()))]
    pub async fn execute(params: &RoadsNearestParams, client: &MapsClient) -> CallToolResult {
        info!("Roads nearest tool called");
        let outcome = client.roads_nearest(&params.points, params.travel_mode).await;

        render(outcome, |value| {
            let count = value["snappedPoints"].as_array().map_or(0, Vec::len);
            format!("Snapped {count} point(s) to roads")
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<RoadsNearestParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: RoadsNearestParams| async move {
            Self::execute(&params, &client).await
        })
    }
}
