//! Example tool arguments resource definition.

use serde_json::json;

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

pub struct CommonQueriesResource;

impl ResourceDefinition for CommonQueriesResource {
    const URI: &'static str = "google-maps://examples/common-queries";
    const NAME: &'static str = "Common Query Examples";
    const DESCRIPTION: &'static str = "Example arguments for common geocoding, place search and routing calls";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Json(json!({
            "geocoding": [
                {
                    "description": "Geocode a full address",
                    "query": "1600 Amphitheatre Parkway, Mountain View, CA"
                },
                {
                    "description": "Geocode a landmark",
                    "query": "Golden Gate Bridge, San Francisco"
                },
                {
                    "description": "Geocode with region bias",
                    "query": "Paris",
                    "region": "FR"
                }
            ],
            "places_search": [
                {
                    "description": "Find restaurants nearby",
                    "query": "restaurants near Times Square",
                    "included_types": ["restaurant"]
                },
                {
                    "description": "Find coffee shops with high rating",
                    "query": "coffee shops",
                    "min_rating": 4.0,
                    "included_types": ["cafe"]
                },
                {
                    "description": "Find open gas stations",
                    "query": "gas stations",
                    "open_now": true,
                    "included_types": ["gas_station"]
                }
            ],
            "routing": [
                {
                    "description": "Driving route with traffic",
                    "origin": {"address": "San Francisco, CA"},
                    "destination": {"address": "Los Angeles, CA"},
                    "travel_mode": "DRIVE",
                    "routing_preference": "TRAFFIC_AWARE"
                },
                {
                    "description": "Walking route",
                    "origin": {"lat": 37.7749, "lng": -122.4194},
                    "destination": {"lat": 37.7849, "lng": -122.4094},
                    "travel_mode": "WALK"
                }
            ]
        }))
    }
}
