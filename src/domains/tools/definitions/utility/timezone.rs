use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::maps::{Coordinate, MapsClient};
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TimezoneGetParams {
    pub lat: f64,
    pub lng: f64,
    /// Unix timestamp in seconds used to resolve daylight saving; defaults to now
    pub timestamp: Option<i64>,
    pub language: Option<String>,
}

pub struct TimezoneGetTool;

impl TimezoneGetTool {
    pub const NAME: &'static str = "timezone_get";

    pub const DESCRIPTION: &'static str = "Get the time zone of a location, including its UTC and daylight saving offsets.";

    #[instrument(skip_all, fields(lat = params.lat, lng = params.lng))]
    pub async fn execute(params: &TimezoneGetParams, client: &MapsClient) -> CallToolResult {
        info!("Timezone tool called");
        let outcome = client
            .timezone_get(
                Coordinate::new(params.lat, params.lng),
                params.timestamp,
                params.language.as_deref(),
            )
            .await;

        render(outcome, |value| {
            let zone = value["timeZoneId"].as_str().unwrap_or("unknown");
            format!("Time zone at {},{}: {zone}", params.lat, params.lng)
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<TimezoneGetParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: TimezoneGetParams| async move {
            Self::execute(&params, &client).await
        })
    }
}
