//! Place details tool definition.
//!
//! Callers may name the fields they want with friendly names such as
//! `opening_hours` or `phone_number`; these are translated into the provider
//! field mask. Without fields a default mask is used.

use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::domains::maps::{DetailsOptions, MapsClient};
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlacesDetailsParams {
    /// Place ID returned by a search or autocomplete call
    pub place_id: String,
    /// Fields to return, e.g. ["name", "rating", "opening_hours"]
    pub fields: Option<Vec<String>>,
    pub language: Option<String>,
    pub region: Option<String>,
    pub session_token: Option<String>,
}

/// Full information about one place.
pub struct PlacesDetailsTool;

impl PlacesDetailsTool {
    pub const NAME: &'static str = "places_details";

    pub const DESCRIPTION: &'static str = "Get detailed information about a place by its ID: address, rating, opening hours, photos, contact details and more.";

    #[instrument(skip_all, fields(place_id = %params.place_id))]
    pub async fn execute(params: &PlacesDetailsParams, client: &MapsClient) -> CallToolResult {
        info!("Places details tool called");
        let options = DetailsOptions {
            fields: params.fields.clone().unwrap_or_default(),
            language: params.language.clone(),
            region: params.region.clone(),
            session_token: params.session_token.clone(),
        };

        let outcome = client
            .places_details(&params.place_id, &options)
            .await
            .map(|result| json!({ "result": result }));

        render(outcome, |value| {
            let name = value["result"]["name"].as_str().unwrap_or("Unknown");
            format!("Details for {name}")
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<PlacesDetailsParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: PlacesDetailsParams| async move {
            Self::execute(&params, &client).await
        })
    }
}
