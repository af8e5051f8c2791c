use serde_json::json;

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Travel modes accepted by the routing tools.
pub struct TravelModesResource;

impl ResourceDefinition for TravelModesResource {
    const URI: &'static str = "google-maps://docs/travel-modes";
    const NAME: &'static str = "Routing Travel Modes";
    const DESCRIPTION: &'static str = "Travel modes available for routes and route matrices";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Json(json!({
            "DRIVE": {
                "description": "Driving directions via roads",
                "supports_traffic": true,
                "supports_tolls": true,
                "supports_alternatives": true
            },
            "WALK": {
                "description": "Walking directions via pedestrian paths",
                "supports_traffic": false,
                "supports_tolls": false,
                "supports_alternatives": true
            },
            "BICYCLE": {
                "description": "Bicycling directions via bike paths and roads",
                "supports_traffic": false,
                "supports_tolls": false,
                "supports_alternatives": true
            },
            "TRANSIT": {
                "description": "Public transportation directions",
                "supports_traffic": true,
                "supports_tolls": false,
                "supports_alternatives": true,
                "note": "Requires transit data availability in the region"
            }
        }))
    }
}
