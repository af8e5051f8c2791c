//! Forward geocoding tool definition.

use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::domains::maps::MapsClient;
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

/// Parameters for forward geocoding.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GeocodeSearchParams {
    /// Address, place name or landmark, e.g. "1600 Amphitheatre Parkway, Mountain View"
    pub query: String,
    /// Region bias as a ccTLD code, e.g. "us" or "fr"
    pub region: Option<String>,
    /// Language of the returned addresses, e.g. "en"
    pub language: Option<String>,
}

/// Address to coordinates.
pub struct GeocodeSearchTool;

impl GeocodeSearchTool {
    pub const NAME: &'static str = "geocode_search";

    pub const DESCRIPTION: &'static str = "Convert an address, place name or landmark into geographic coordinates. Supports region biasing and localized results.";

    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(params: &GeocodeSearchParams, client: &MapsClient) -> CallToolResult {
        info!("Geocode search tool called");
        let outcome = client
            .geocode_search(
                &params.query,
                params.region.as_deref(),
                params.language.as_deref(),
            )
            .await
            .map(|results| json!({ "results": results }));

        render(outcome, |value| {
            let count = value["results"].as_array().map_or(0, Vec::len);
            format!("Found {count} geocoding result(s) for '{}'", params.query)
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<GeocodeSearchParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: GeocodeSearchParams| async move {
            Self::execute(&params, &client).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_optional_fields() {
        let params: GeocodeSearchParams =
            serde_json::from_value(json!({"query": "Eiffel Tower"})).unwrap();
        assert_eq!(params.query, "Eiffel Tower");
        assert!(params.region.is_none());
    }

    #[test]
    fn test_tool_metadata() {
        let tool = GeocodeSearchTool::to_tool();
        assert_eq!(tool.name, GeocodeSearchTool::NAME);
        assert!(tool.input_schema.contains_key("properties"));
    }
}
