//! Stable output records and request enums of the maps client.
//!
//! The records here are what callers see regardless of which upstream
//! response variant produced them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::geo::{Coordinate, LocationRef};

// ============================================================================
// Output records
// ============================================================================

/// A forward or reverse geocoding hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub location: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_components: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

/// A place, normalized from either the legacy or the new Places shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlaceResult {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_components: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editorial_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub international_phone_number: Option<String>,
}

/// Toll estimate attached to a route.
///
/// Upstream toll data is not parsed: whenever toll info is present the
/// estimate reads USD 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TollEstimate {
    pub currency: String,
    pub estimated: f64,
}

impl TollEstimate {
    pub fn placeholder() -> Self {
        Self {
            currency: "USD".to_string(),
            estimated: 0.0,
        }
    }
}

/// One leg of a route, reduced to its endpoints and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteLeg {
    pub start: Coordinate,
    pub end: Coordinate,
    pub steps: usize,
    pub distance_meters: u64,
    pub duration_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteResult {
    pub distance_meters: u64,
    pub duration_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_traffic_seconds: Option<u64>,
    pub polyline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolls: Option<TollEstimate>,
    pub legs: Vec<RouteLeg>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RoutesResponse {
    pub routes: Vec<RouteResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ElevationResult {
    pub elevation: f64,
    pub location: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f64>,
}

/// Device location estimated from radio signals and/or the caller IP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeolocationResult {
    pub location: Coordinate,
    /// Radius of 68% confidence around `location`, in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// A nearby place with its straight-line distance from the search origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NearbyPlace {
    pub id: String,
    pub name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
    pub distance_meters: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NearbyFindResult {
    pub origin: Coordinate,
    pub results: Vec<NearbyPlace>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IpLocation {
    pub lat: f64,
    pub lng: f64,
    pub accuracy_radius_meters: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NormalizedAddress {
    pub formatted_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_components: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IpGeolocationSource {
    pub provider: String,
    pub reverse_geocode: bool,
    pub ip_override_attempted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IpGeolocationResult {
    pub method: String,
    pub approximate: bool,
    pub location: IpLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_address: Option<NormalizedAddress>,
    pub source: IpGeolocationSource,
}

// ============================================================================
// Request enums
// ============================================================================

/// An intermediate stop on a computed route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteWaypoint {
    pub location: LocationRef,
    /// Pass through without stopping
    #[serde(default)]
    pub via: bool,
}

impl RouteWaypoint {
    pub fn to_provider_value(&self) -> Value {
        let mut waypoint = self.location.to_route_waypoint();
        if self.via {
            waypoint["via"] = Value::Bool(true);
        }
        waypoint
    }
}

/// A WiFi access point seen by the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WifiAccessPoint {
    /// MAC address of the access point
    pub mac_address: String,
    /// Signal strength in dBm
    pub signal_strength: Option<i32>,
    /// Milliseconds since the access point was detected
    pub age: Option<u64>,
    pub channel: Option<u32>,
    /// Signal to noise ratio in dB
    pub signal_to_noise: Option<i32>,
}

impl WifiAccessPoint {
    pub fn to_provider_value(&self) -> Value {
        let mut value = json!({ "macAddress": self.mac_address });
        insert_opt(&mut value, "signalStrength", self.signal_strength);
        insert_opt(&mut value, "age", self.age);
        insert_opt(&mut value, "channel", self.channel);
        insert_opt(&mut value, "signalToNoise", self.signal_to_noise);
        value
    }
}

/// A cell tower seen by the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CellTower {
    pub cell_id: u64,
    pub location_area_code: u64,
    pub mobile_country_code: u32,
    pub mobile_network_code: u32,
    pub age: Option<u64>,
    pub signal_strength: Option<i32>,
    pub timing_advance: Option<u32>,
}

impl CellTower {
    pub fn to_provider_value(&self) -> Value {
        let mut value = json!({
            "cellId": self.cell_id,
            "locationAreaCode": self.location_area_code,
            "mobileCountryCode": self.mobile_country_code,
            "mobileNetworkCode": self.mobile_network_code,
        });
        insert_opt(&mut value, "age", self.age);
        insert_opt(&mut value, "signalStrength", self.signal_strength);
        insert_opt(&mut value, "timingAdvance", self.timing_advance);
        value
    }
}

fn insert_opt<T: Into<Value>>(target: &mut Value, key: &str, value: Option<T>) {
    if let (Some(map), Some(value)) = (target.as_object_mut(), value) {
        map.insert(key.to_string(), value.into());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    #[default]
    Drive,
    Walk,
    Bicycle,
    Transit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingPreference {
    TrafficUnaware,
    #[default]
    TrafficAware,
    TrafficAwareOptimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Units {
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankPreference {
    Relevance,
    Distance,
}

/// Travel mode accepted by the Roads API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoadsTravelMode {
    Driving,
    Walking,
    Bicycling,
}

impl RoadsTravelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "DRIVING",
            Self::Walking => "WALKING",
            Self::Bicycling => "BICYCLING",
        }
    }
}

/// What `nearby_find` looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NearbyTarget {
    Cities,
    Towns,
    Pois,
    Custom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_use_provider_spelling() {
        assert_eq!(
            serde_json::to_value(RoutingPreference::TrafficAwareOptimal).unwrap(),
            "TRAFFIC_AWARE_OPTIMAL"
        );
        assert_eq!(serde_json::to_value(TravelMode::Bicycle).unwrap(), "BICYCLE");
        let target: NearbyTarget = serde_json::from_str(r#""pois""#).unwrap();
        assert_eq!(target, NearbyTarget::Pois);
    }

    #[test]
    fn test_via_waypoint() {
        let waypoint = RouteWaypoint {
            location: LocationRef::Address {
                address: "Lyon".to_string(),
            },
            via: true,
        };
        assert_eq!(
            waypoint.to_provider_value(),
            json!({"address": "Lyon", "via": true})
        );
    }

    #[test]
    fn test_wifi_access_point_uses_camel_case() {
        let ap: WifiAccessPoint =
            serde_json::from_str(r#"{"mac_address": "00:11:22:33:44:55", "signal_strength": -65}"#)
                .unwrap();
        assert_eq!(
            ap.to_provider_value(),
            json!({"macAddress": "00:11:22:33:44:55", "signalStrength": -65})
        );
    }

    #[test]
    fn test_cell_tower_uses_camel_case() {
        let tower = CellTower {
            cell_id: 42,
            location_area_code: 415,
            mobile_country_code: 310,
            mobile_network_code: 410,
            age: None,
            signal_strength: None,
            timing_advance: Some(15),
        };
        assert_eq!(
            tower.to_provider_value(),
            json!({
                "cellId": 42,
                "locationAreaCode": 415,
                "mobileCountryCode": 310,
                "mobileNetworkCode": 410,
                "timingAdvance": 15
            })
        );
    }

    #[test]
    fn test_place_result_skips_absent_fields() {
        let place = PlaceResult {
            id: "abc".to_string(),
            name: "Cafe".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&place).unwrap(),
            serde_json::json!({"id": "abc", "name": "Cafe"})
        );
    }
}
