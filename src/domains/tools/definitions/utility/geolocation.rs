//! Device location estimate from WiFi and cell observations.

use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::maps::{CellTower, GeolocationRequest, MapsClient, WifiAccessPoint};
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GeolocationEstimateParams {
    /// WiFi access points seen by the device
    pub wifi_access_points: Option<Vec<WifiAccessPoint>>,
    /// Cell towers seen by the device
    pub cell_towers: Option<Vec<CellTower>>,
    /// Fall back to the request IP when signals are insufficient. Defaults to true.
    pub consider_ip: Option<bool>,
}

pub struct GeolocationEstimateTool;

impl GeolocationEstimateTool {
    pub const NAME: &'static str = "geolocation_estimate";

    pub const DESCRIPTION: &'static str = "Estimate a device location from nearby WiFi access points and cell towers, falling back to the IP address.";

    #[instrument(skip_all)]
    pub async fn execute(params: &GeolocationEstimateParams, client: &MapsClient) -> CallToolResult {
        info!("Geolocation estimate tool called");
        let request = GeolocationRequest {
            wifi_access_points: params.wifi_access_points.clone().unwrap_or_default(),
            cell_towers: params.cell_towers.clone().unwrap_or_default(),
            consider_ip: params.consider_ip,
        };

        let outcome = client.geolocation_estimate(&request).await;

        render(outcome, |estimate| match estimate.accuracy {
            Some(accuracy) => format!(
                "Estimated location {},{} (accuracy {accuracy}m)",
                estimate.location.lat, estimate.location.lng
            ),
            None => format!(
                "Estimated location {},{}",
                estimate.location.lat, estimate.location.lng
            ),
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<GeolocationEstimateParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: GeolocationEstimateParams| async move {
            Self::execute(&params, &client).await
        })
    }
}
