//! Provider surfaces and their base URLs.

use serde::{Deserialize, Serialize};

/// A group of endpoints sharing a base URL and an auth convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiSurface {
    /// Query-string APIs under the shared maps host (geocode, elevation, timezone, photo).
    Legacy,
    Places,
    Routes,
    Geolocation,
    Roads,
}

impl ApiSurface {
    /// Places and Routes take the key and a field mask as headers. Every
    /// other surface takes the key as a `key` query parameter.
    pub fn uses_header_auth(self) -> bool {
        matches!(self, Self::Places | Self::Routes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub legacy_base_url: String,
    pub places_base_url: String,
    pub routes_base_url: String,
    pub geolocation_base_url: String,
    pub roads_base_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            legacy_base_url: "https://maps.googleapis.com/maps/api".to_string(),
            places_base_url: "https://places.googleapis.com".to_string(),
            routes_base_url: "https://routes.googleapis.com".to_string(),
            geolocation_base_url: "https://www.googleapis.com".to_string(),
            roads_base_url: "https://roads.googleapis.com".to_string(),
        }
    }
}

impl EndpointConfig {
    /// Every surface pointed at one host. Used to aim the client at a mock server.
    pub fn single_host(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            legacy_base_url: base_url.clone(),
            places_base_url: base_url.clone(),
            routes_base_url: base_url.clone(),
            geolocation_base_url: base_url.clone(),
            roads_base_url: base_url,
        }
    }

    pub fn base_url(&self, surface: ApiSurface) -> &str {
        let url = match surface {
            ApiSurface::Legacy => &self.legacy_base_url,
            ApiSurface::Places => &self.places_base_url,
            ApiSurface::Routes => &self.routes_base_url,
            ApiSurface::Geolocation => &self.geolocation_base_url,
            ApiSurface::Roads => &self.roads_base_url,
        };
        url.trim_end_matches('/')
    }

    /// Base URL plus endpoint path, without any query string.
    pub fn url_for(&self, surface: ApiSurface, path: &str) -> String {
        format!("{}{}", self.base_url(surface), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_auth_surfaces() {
        assert!(ApiSurface::Places.uses_header_auth());
        assert!(ApiSurface::Routes.uses_header_auth());
        assert!(!ApiSurface::Legacy.uses_header_auth());
        assert!(!ApiSurface::Geolocation.uses_header_auth());
        assert!(!ApiSurface::Roads.uses_header_auth());
    }

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let endpoints = EndpointConfig::single_host("http://127.0.0.1:9000/");
        assert_eq!(
            endpoints.url_for(ApiSurface::Places, "/v1/places:searchText"),
            "http://127.0.0.1:9000/v1/places:searchText"
        );
    }

    #[test]
    fn test_default_urls() {
        let endpoints = EndpointConfig::default();
        assert_eq!(
            endpoints.url_for(ApiSurface::Legacy, "/geocode/json"),
            "https://maps.googleapis.com/maps/api/geocode/json"
        );
        assert_eq!(
            endpoints.url_for(ApiSurface::Geolocation, "/geolocation/v1/geolocate"),
            "https://www.googleapis.com/geolocation/v1/geolocate"
        );
    }
}
