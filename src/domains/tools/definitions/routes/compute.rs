//! Route computation tool definition.

use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::maps::{
    LocationRef, MapsClient, RouteOptions, RouteWaypoint, RoutingPreference, TravelMode, Units,
};
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

/// Origin and destination accept either `{lat, lng}` or `{address}`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RoutesComputeParams {
    pub origin: LocationRef,
    pub destination: LocationRef,
    /// Intermediate stops, in order
    pub waypoints: Option<Vec<RouteWaypoint>>,
    /// DRIVE (default), WALK, BICYCLE or TRANSIT
    pub travel_mode: Option<TravelMode>,
    pub routing_preference: Option<RoutingPreference>,
    #[serde(default)]
    pub compute_alternative_routes: bool,
    #[serde(default)]
    pub avoid_tolls: bool,
    #[serde(default)]
    pub avoid_highways: bool,
    #[serde(default)]
    pub avoid_ferries: bool,
    pub language: Option<String>,
    pub region: Option<String>,
    pub units: Option<Units>,
}

impl RoutesComputeParams {
    fn options(&self) -> RouteOptions {
        RouteOptions {
            waypoints: self.waypoints.clone().unwrap_or_default(),
            travel_mode: self.travel_mode,
            routing_preference: self.routing_preference,
            compute_alternative_routes: self.compute_alternative_routes,
            avoid_tolls: self.avoid_tolls,
            avoid_highways: self.avoid_highways,
            avoid_ferries: self.avoid_ferries,
            language: self.language.clone(),
            region: self.region.clone(),
            units: self.units,
        }
    }
}

pub struct RoutesComputeTool;

impl RoutesComputeTool {
    pub const NAME: &'static str = "routes_compute";

    pub const DESCRIPTION: &'static str = "Compute a route between an origin and a destination with optional waypoints. Returns distance, duration, traffic-aware duration, the encoded polyline and per-leg details.";

    #[instrument(skip_all)]
    pub async fn execute(params: &RoutesComputeParams, client: &MapsClient) -> CallToolResult {
        info!("Routes compute tool called");
        let outcome = client
            .routes_compute(&params.origin, &params.destination, &params.options())
            .await;

        render(outcome, |response| {
            match response.routes.first() {
                Some(route) => format!(
                    "Found {} route(s); primary is {}m, {}s",
                    response.routes.len(),
                    route.distance_meters,
                    route.duration_seconds
                ),
                None => "No route found".to_string(),
            }
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<RoutesComputeParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: RoutesComputeParams| async move {
            Self::execute(&params, &client).await
        })
    }
}
