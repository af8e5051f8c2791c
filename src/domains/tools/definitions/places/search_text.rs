//! Text search tool definition.
//!
//! Translates the friendly 0-4 price scale and the `{lat, lng}` location
//! bias into the Places API forms before calling the client.

use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::domains::maps::error::INVALID_REQUEST;
use crate::domains::maps::{LocationBias, MapsClient, MapsError, RankPreference, TextSearchOptions};
use crate::domains::tools::definitions::common::{error_result, maps_route, render, tool_model};

/// Provider names for price levels 0 (free) through 4 (very expensive).
const PRICE_LEVELS: [&str; 5] = [
    "PRICE_LEVEL_FREE",
    "PRICE_LEVEL_INEXPENSIVE",
    "PRICE_LEVEL_MODERATE",
    "PRICE_LEVEL_EXPENSIVE",
    "PRICE_LEVEL_VERY_EXPENSIVE",
];

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlacesSearchTextParams {
    /// Natural language query, e.g. "vegan restaurants in Berlin"
    pub query: String,
    /// Place types to include, e.g. ["restaurant"]
    pub included_types: Option<Vec<String>>,
    /// Place types to exclude
    pub excluded_types: Option<Vec<String>>,
    /// Only return places open now
    pub open_now: Option<bool>,
    /// Price levels from 0 (free) to 4 (very expensive)
    pub price_levels: Option<Vec<u8>>,
    /// Minimum average rating, 0 to 5
    pub min_rating: Option<f64>,
    /// Prefer results within this circle
    pub location_bias: Option<LocationBias>,
    /// RELEVANCE or DISTANCE
    pub rank_preference: Option<RankPreference>,
    pub language: Option<String>,
    pub region: Option<String>,
    /// Maximum number of results, 1 to 20
    pub max_results: Option<u32>,
}

/// Map friendly price levels to provider names.
pub fn price_level_names(levels: &[u8]) -> Result<Vec<String>, MapsError> {
    levels
        .iter()
        .map(|level| {
            PRICE_LEVELS
                .get(usize::from(*level))
                .map(|name| name.to_string())
                .ok_or_else(|| {
                    MapsError::invalid_input(INVALID_REQUEST, "price_levels must be between 0 and 4")
                        .with_context("price_level", *level)
                })
        })
        .collect()
}

/// Natural language place search.
pub struct PlacesSearchTextTool;

impl PlacesSearchTextTool {
    pub const NAME: &'static str = "places_search_text";

    pub const DESCRIPTION: &'static str = "Search for places with a natural language query. Supports type filters, minimum rating, price levels, location bias and open-now filtering.";

    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(params: &PlacesSearchTextParams, client: &MapsClient) -> CallToolResult {
        info!("Places text search tool called");

        let price_levels = match price_level_names(params.price_levels.as_deref().unwrap_or_default()) {
            Ok(levels) => levels,
            Err(e) => return error_result(&e),
        };

        let options = TextSearchOptions {
            included_types: params.included_types.clone().unwrap_or_default(),
            excluded_types: params.excluded_types.clone().unwrap_or_default(),
            open_now: params.open_now,
            price_levels,
            min_rating: params.min_rating,
            location_bias: params.location_bias.clone(),
            rank_preference: params.rank_preference,
            language: params.language.clone(),
            region: params.region.clone(),
            max_results: params.max_results,
        };

        let outcome = client
            .places_search_text(&params.query, &options)
            .await
            .map(|results| json!({ "results": results }));

        render(outcome, |value| {
            let count = value["results"].as_array().map_or(0, Vec::len);
            format!("Found {count} place(s) for '{}'", params.query)
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<PlacesSearchTextParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: PlacesSearchTextParams| async move {
            Self::execute(&params, &client).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_level_names() {
        assert_eq!(
            price_level_names(&[0, 2, 4]).unwrap(),
            vec![
                "PRICE_LEVEL_FREE",
                "PRICE_LEVEL_MODERATE",
                "PRICE_LEVEL_VERY_EXPENSIVE"
            ]
        );
        assert!(price_level_names(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_price_level_out_of_range() {
        let err = price_level_names(&[1, 5]).unwrap_err();
        assert_eq!(err.kind, INVALID_REQUEST);
        assert_eq!(err.context["price_level"], json!(5));
    }

    #[test]
    fn test_params_with_location_bias() {
        let params: PlacesSearchTextParams = serde_json::from_value(json!({
            "query": "coffee",
            "location_bias": {"circle": {"center": {"lat": 1.0, "lng": 2.0}, "radius_meters": 300.0}},
            "rank_preference": "DISTANCE"
        }))
        .unwrap();
        assert_eq!(params.rank_preference, Some(RankPreference::Distance));
        assert!(params.location_bias.is_some());
    }
}
