//! API overview resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Overview of the provider APIs reachable through the tools (static Markdown).
pub struct ApiOverviewResource;

impl ResourceDefinition for ApiOverviewResource {
    const URI: &'static str = "google-maps://docs/api-overview";
    const NAME: &'static str = "Google Maps Platform API Overview";
    const DESCRIPTION: &'static str =
        "Overview of the Google Maps Platform APIs available through this server and their capabilities";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(OVERVIEW.to_string())
    }
}

const OVERVIEW: &str = r#"# Google Maps Platform APIs

This server exposes the following Google Maps Platform APIs as tools.

## Places API (New)
- **Text Search** (`places_search_text`): find places with a natural language query
- **Nearby Search** (`places_nearby`): discover places within a circle
- **Place Details** (`places_details`): full information about one place
- **Autocomplete** (`places_autocomplete`): suggestions while the user types
- **Photos** (`places_photos`): signed photo URLs

## Routes API v2
- **Compute Routes** (`routes_compute`): best route between two locations, with waypoints
- **Route Matrix** (`routes_matrix`): travel times and distances for many origin/destination pairs
- Traffic-aware routing and alternative routes

## Geocoding API
- **Forward Geocoding** (`geocode_search`): addresses to coordinates
- **Reverse Geocoding** (`geocode_reverse`): coordinates to addresses

## Utility APIs
- **Elevation** (`elevation_get`): elevation for points or along a path
- **Time Zone** (`timezone_get`): time zone and offsets for a coordinate
- **Geolocation** (`geolocation_estimate`): location from WiFi and cell tower data
- **Roads** (`roads_nearest`): snap coordinates to the road network

## Discovery
- **Nearby Find** (`nearby_find`): cities, towns or points of interest around an address, nearest first
- **IP Geolocate** (`ip_geolocate`): approximate location of the calling network

## Notes
- Responses are cached briefly and requests are rate limited per endpoint.
- Transient failures (timeouts, HTTP 429 and 5xx) are retried with exponential backoff.
- Failures are reported as `{"error": {"code", "message", "context"}}`.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_mentions_every_api_group() {
        for heading in ["Places API", "Routes API", "Geocoding API", "Utility APIs"] {
            assert!(OVERVIEW.contains(heading), "missing {heading}");
        }
    }
}
