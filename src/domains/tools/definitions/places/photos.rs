//! Photo URL construction. No request is made to the provider.

use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::domains::maps::MapsClient;
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlacesPhotosParams {
    /// Photo reference from a place result
    pub photo_reference: String,
    /// Maximum width in pixels, 1 to 1600
    pub max_width: Option<u32>,
    /// Maximum height in pixels, 1 to 1600
    pub max_height: Option<u32>,
}

pub struct PlacesPhotosTool;

impl PlacesPhotosTool {
    pub const NAME: &'static str = "places_photos";

    pub const DESCRIPTION: &'static str = "Build a URL for a place photo from its photo reference, with optional maximum dimensions.";

    #[instrument(skip_all)]
    pub async fn execute(params: &PlacesPhotosParams, client: &MapsClient) -> CallToolResult {
        debug!("Places photos tool called");
        let outcome = client
            .places_photo_url(&params.photo_reference, params.max_width, params.max_height)
            .map(|url| json!({ "photo_url": url }));

        render(outcome, |_| "Photo URL generated".to_string())
    }

    pub fn to_tool() -> Tool {
        tool_model::<PlacesPhotosParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: PlacesPhotosParams| async move {
            Self::execute(&params, &client).await
        })
    }
}
