//! Reverse geocoding tool definition.

use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::domains::maps::{Coordinate, MapsClient};
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GeocodeReverseParams {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Language of the returned addresses, e.g. "en"
    pub language: Option<String>,
}

/// Coordinates to addresses.
pub struct GeocodeReverseTool;

impl GeocodeReverseTool {
    pub const NAME: &'static str = "geocode_reverse";

    pub const DESCRIPTION: &'static str = "Convert geographic coordinates into human-readable addresses with detailed address components.";

    #[instrument(skip_all, fields(lat = params.lat, lng = params.lng))]
    pub async fn execute(params: &GeocodeReverseParams, client: &MapsClient) -> CallToolResult {
        info!("Reverse geocode tool called");
        let outcome = client
            .geocode_reverse(
                Coordinate::new(params.lat, params.lng),
                params.language.as_deref(),
            )
            .await
            .map(|results| json!({ "results": results }));

        render(outcome, |value| {
            let count = value["results"].as_array().map_or(0, Vec::len);
            format!("Found {count} address(es) at {},{}", params.lat, params.lng)
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<GeocodeReverseParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: GeocodeReverseParams| async move {
            Self::execute(&params, &client).await
        })
    }
}
