use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::domains::maps::{LocationRef, MapsClient, MatrixOptions, RoutingPreference, TravelMode, Units};
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RoutesMatrixParams {
    /// Starting points, each `{lat, lng}` or `{address}`
    pub origins: Vec<LocationRef>,
    /// End points, each `{lat, lng}` or `{address}`
    pub destinations: Vec<LocationRef>,
    pub travel_mode: Option<TravelMode>,
    pub routing_preference: Option<RoutingPreference>,
    pub language: Option<String>,
    pub region: Option<String>,
    pub units: Option<Units>,
}

/// Distance matrix between many origins and destinations.
pub struct RoutesMatrixTool;

impl RoutesMatrixTool {
    pub const NAME: &'static str = "routes_matrix";

    pub const DESCRIPTION: &'static str = "Compute distances and durations between multiple origins and destinations.";

    #[instrument(skip_all, fields(origins = params.origins.len(), destinations = params.destinations.len()))]
    pub async fn execute(params: &RoutesMatrixParams, client: &MapsClient) -> CallToolResult {
        info!("Routes matrix tool called");
        let options = MatrixOptions {
            travel_mode: params.travel_mode,
            routing_preference: params.routing_preference,
            language: params.language.clone(),
            region: params.region.clone(),
            units: params.units,
        };

        let outcome = client
            .routes_matrix(&params.origins, &params.destinations, &options)
            .await
            .map(|payload| match payload {
                Value::Array(elements) => json!({ "elements": elements }),
                other => other,
            });

        render(outcome, |value| {
            let count = value["elements"].as_array().map_or(0, Vec::len);
            format!(
                "Computed {count} element(s) for {}x{} matrix",
                params.origins.len(),
                params.destinations.len()
            )
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<RoutesMatrixParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: RoutesMatrixParams| async move {
            Self::execute(&params, &client).await
        })
    }
}
