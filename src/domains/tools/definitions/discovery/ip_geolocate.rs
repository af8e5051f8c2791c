use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::maps::{IpGeolocateRequest, MapsClient};
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct IpGeolocateParams {
    /// Also resolve the estimate to a street address
    #[serde(default)]
    pub reverse_geocode: bool,
    /// Language for the resolved address
    pub language: Option<String>,
    /// Public IP to locate. Validated only; the provider locates the caller's own address.
    pub ip_override: Option<String>,
}

/// Approximate location of the calling network.
pub struct IpGeolocateTool;

impl IpGeolocateTool {
    pub const NAME: &'static str = "ip_geolocate";

    pub const DESCRIPTION: &'static str = "Estimate the approximate location of the calling network from its IP address, with an accuracy radius and optional reverse geocoding.";

    #[instrument(skip_all, fields(reverse_geocode = params.reverse_geocode))]
    pub async fn execute(params: &IpGeolocateParams, client: &MapsClient) -> CallToolResult {
        info!("IP geolocate tool called");
        let request = IpGeolocateRequest {
            reverse_geocode: params.reverse_geocode,
            language: params.language.clone(),
            ip_override: params.ip_override.clone(),
        };

        let outcome = client.ip_geolocate(&request).await;

        render(outcome, |result| {
            let place = result
                .normalized_address
                .as_ref()
                .map(|address| format!(" near {}", address.formatted_address))
                .unwrap_or_default();
            format!(
                "Approximate location {},{}{place} (radius {}m)",
                result.location.lat, result.location.lng, result.location.accuracy_radius_meters
            )
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<IpGeolocateParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: IpGeolocateParams| async move {
            Self::execute(&params, &client).await
        })
    }
}
