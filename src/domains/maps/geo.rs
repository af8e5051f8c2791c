//! Geographic primitives shared by the maps client and the tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A point in WGS84 degrees.
///
/// Range is not validated here: callers own that, and nothing downstream
/// panics on out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinate {
    /// Latitude in degrees (e.g., 37.7749)
    pub lat: f64,
    /// Longitude in degrees (e.g., -122.4194)
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `lat,lng` as the legacy query-string APIs expect.
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }

    /// `{latitude, longitude}` as the Places and Routes APIs expect.
    pub fn to_lat_lng_literal(&self) -> Value {
        json!({ "latitude": self.lat, "longitude": self.lng })
    }
}

/// Either a coordinate or a free-text address.
///
/// Deserialization picks `Address` when an `address` field is present and
/// falls back to `lat`/`lng` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LocationRef {
    /// A text address, e.g. {"address": "123 Main St, San Francisco, CA"}
    Address { address: String },
    /// Geographic coordinates, e.g. {"lat": 37.7749, "lng": -122.4194}
    Coordinate(Coordinate),
}

impl LocationRef {
    /// Waypoint shape used by the Routes API.
    pub fn to_route_waypoint(&self) -> Value {
        match self {
            Self::Address { address } => json!({ "address": address }),
            Self::Coordinate(c) => json!({ "location": { "latLng": c.to_lat_lng_literal() } }),
        }
    }
}

impl From<Coordinate> for LocationRef {
    fn from(c: Coordinate) -> Self {
        Self::Coordinate(c)
    }
}

/// Soft preference for results near a circle.
///
/// Accepted as `{circle: {center: {lat, lng}, radius_meters}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocationBias {
    pub circle: CircleArea,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CircleArea {
    pub center: Coordinate,
    /// Radius in meters
    pub radius_meters: f64,
}

impl LocationBias {
    /// `{circle: {center: {latitude, longitude}, radius}}` as the Places API expects.
    pub fn to_provider_value(&self) -> Value {
        json!({
            "circle": {
                "center": self.circle.center.to_lat_lng_literal(),
                "radius": self.circle.radius_meters,
            }
        })
    }
}

/// Join points as `lat,lng|lat,lng`.
pub fn join_points(points: &[Coordinate]) -> String {
    points
        .iter()
        .map(Coordinate::to_query_value)
        .collect::<Vec<_>>()
        .join("|")
}

/// Great-circle distance between two points in meters.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAN_FRANCISCO: Coordinate = Coordinate {
        lat: 37.7749,
        lng: -122.4194,
    };
    const LOS_ANGELES: Coordinate = Coordinate {
        lat: 34.0522,
        lng: -118.2437,
    };

    #[test]
    fn test_haversine_same_point_is_zero() {
        assert_eq!(haversine_distance(SAN_FRANCISCO, SAN_FRANCISCO), 0.0);
    }

    #[test]
    fn test_haversine_sf_to_la() {
        let d = haversine_distance(SAN_FRANCISCO, LOS_ANGELES);
        assert!((d - 559_000.0).abs() < 5_000.0, "got {d}");
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let there = haversine_distance(SAN_FRANCISCO, LOS_ANGELES);
        let back = haversine_distance(LOS_ANGELES, SAN_FRANCISCO);
        assert!((there - back).abs() < 1e-6);
    }

    #[test]
    fn test_haversine_out_of_range_does_not_panic() {
        let d = haversine_distance(Coordinate::new(123.0, 400.0), Coordinate::new(-95.0, -190.0));
        assert!(d.is_finite());
    }

    #[test]
    fn test_location_ref_prefers_address() {
        let loc: LocationRef = serde_json::from_str(r#"{"address": "Paris"}"#).unwrap();
        assert_eq!(
            loc,
            LocationRef::Address {
                address: "Paris".to_string()
            }
        );

        let loc: LocationRef = serde_json::from_str(r#"{"lat": 1.5, "lng": 2.5}"#).unwrap();
        assert_eq!(loc, LocationRef::Coordinate(Coordinate::new(1.5, 2.5)));
    }

    #[test]
    fn test_route_waypoint_shapes() {
        let addr = LocationRef::Address {
            address: "Paris".to_string(),
        };
        assert_eq!(addr.to_route_waypoint(), json!({"address": "Paris"}));

        let point = LocationRef::from(Coordinate::new(1.0, 2.0));
        assert_eq!(
            point.to_route_waypoint(),
            json!({"location": {"latLng": {"latitude": 1.0, "longitude": 2.0}}})
        );
    }

    #[test]
    fn test_location_bias_translation() {
        let bias: LocationBias = serde_json::from_value(json!({
            "circle": {"center": {"lat": 48.85, "lng": 2.35}, "radius_meters": 500.0}
        }))
        .unwrap();
        assert_eq!(
            bias.to_provider_value(),
            json!({"circle": {"center": {"latitude": 48.85, "longitude": 2.35}, "radius": 500.0}})
        );
    }

    #[test]
    fn test_join_points() {
        let points = [Coordinate::new(1.0, 2.0), Coordinate::new(3.5, -4.25)];
        assert_eq!(join_points(&points), "1,2|3.5,-4.25");
    }
}
