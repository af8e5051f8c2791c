//! Elevation lookup tool definition.
//!
//! Accepts either discrete `locations` or a `path` sampled `samples` times.
//! When both are given, `locations` wins.

use std::sync::Arc;

use rmcp::{handler::server::tool::ToolRoute, model::{CallToolResult, Tool}};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::domains::maps::{Coordinate, ElevationQuery, MapsClient};
use crate::domains::tools::definitions::common::{maps_route, render, tool_model};

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ElevationGetParams {
    /// Points to get elevation for
    pub locations: Option<Vec<Coordinate>>,
    /// Encoded polyline or `lat,lng|lat,lng` path to sample along
    pub path: Option<String>,
    /// Number of samples along the path
    pub samples: Option<u32>,
}

impl ElevationGetParams {
    fn query(&self) -> ElevationQuery {
        match (&self.locations, &self.path) {
            (Some(locations), _) if !locations.is_empty() => {
                ElevationQuery::Locations(locations.clone())
            }
            (_, Some(path)) => ElevationQuery::Path {
                path: path.clone(),
                samples: self.samples,
            },
            _ => ElevationQuery::Locations(Vec::new()),
        }
    }
}

pub struct ElevationGetTool;

impl ElevationGetTool {
    pub const NAME: &'static str = "elevation_get";

    pub const DESCRIPTION: &'static str = "Get elevation in meters for a list of locations or sampled along a path.";

    #[instrument(skip_all)]
    pub async fn execute(params: &ElevationGetParams, client: &MapsClient) -> CallToolResult {
        info!("Elevation tool called");
        let outcome = client
            .elevation_get(&params.query())
            .await
            .map(|results| json!({ "results": results }));

        render(outcome, |value| {
            let count = value["results"].as_array().map_or(0, Vec::len);
            format!("Retrieved {count} elevation sample(s)")
        })
    }

    pub fn to_tool() -> Tool {
        tool_model::<ElevationGetParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<MapsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        maps_route(Self::to_tool(), client, |client, params: ElevationGetParams| async move {
            Self::execute(&params, &client).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locations_take_precedence() {
        let params = ElevationGetParams {
            locations: Some(vec![Coordinate::new(1.0, 2.0)]),
            path: Some("enc".into()),
            samples: Some(3),
        };
        assert!(matches!(params.query(), ElevationQuery::Locations(points) if points.len() == 1));
    }

    #[test]
    fn test_path_with_samples() {
        let params = ElevationGetParams {
            locations: Some(Vec::new()),
            path: Some("36.5,-118.2|36.6,-117.0".into()),
            samples: Some(10),
        };
        match params.query() {
            ElevationQuery::Path { path, samples } => {
                assert_eq!(path, "36.5,-118.2|36.6,-117.0");
                assert_eq!(samples, Some(10));
            }
            other => panic!("unexpected query: {other:?}"),
        }
    }

    #[test]
    fn test_empty_params_yield_empty_query() {
        let query = ElevationGetParams::default().query();
        assert!(matches!(query, ElevationQuery::Locations(points) if points.is_empty()));
    }
}
