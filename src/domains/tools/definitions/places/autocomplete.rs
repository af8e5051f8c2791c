//! Autocomplete suggestions for partially typed input.

use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::domains::maps::{AutocompleteOptions, LocationBias, MapsClient};
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlacesAutocompleteParams {
    /// Partial text typed by the user
    pub input: String,
    /// Groups autocomplete and details calls into one billing session
    pub session_token: Option<String>,
    pub location_bias: Option<LocationBias>,
    pub included_types: Option<Vec<String>>,
    pub language: Option<String>,
    pub region: Option<String>,
}

pub struct PlacesAutocompleteTool;

impl PlacesAutocompleteTool {
    pub const NAME: &'static str = "places_autocomplete";

    pub const DESCRIPTION: &'static str = "Get place predictions for partial text input. Use a session token to group a series of autocomplete calls with the final details lookup.";

    #[instrument(skip_all, fields(input = %params.input))]
    pub async fn execute(params: &PlacesAutocompleteParams, client: &MapsClient) -> CallToolResult {
        info!("Places autocomplete tool called");
        let options = AutocompleteOptions {
            session_token: params.session_token.clone(),
            location_bias: params.location_bias.clone(),
            included_types: params.included_types.clone().unwrap_or_default(),
            language: params.language.clone(),
            region: params.region.clone(),
        };

        let outcome = client
            .places_autocomplete(&params.input, &options)
            .await
            .map(|predictions| json!({ "predictions": predictions }));

        render(outcome, |value| {
            let count = value["predictions"].as_array().map_or(0, Vec::len);
            format!("{count} prediction(s) for '{}'", params.input)
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<PlacesAutocompleteParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: PlacesAutocompleteParams| async move {
            Self::execute(&params, &client).await
        })
    }
}
