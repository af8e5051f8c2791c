//! Shape adapters from provider JSON to the stable output records.
//!
//! The same logical entity arrives in a legacy shape (`formatted_address`,
//! `geometry.location.{lat,lng}`) or a newer shape (`formattedAddress`,
//! `location.{latitude,longitude}`). Every adapter here accepts both and
//! never fails: absent or malformed fields become `None` or zero.

use serde_json::Value;

use super::geo::Coordinate;
use super::types::{
    ElevationResult, GeocodeResult, GeolocationResult, PlaceResult, RouteLeg, RouteResult,
    TollEstimate,
};

/// Friendly and legacy place field names mapped to the new Places API names.
const PLACE_FIELD_NAMES: &[(&str, &str)] = &[
    ("id", "id"),
    ("place_id", "id"),
    ("name", "displayName"),
    ("formatted_address", "formattedAddress"),
    ("address_components", "addressComponents"),
    ("editorial_summary", "editorialSummary"),
    ("reviews", "reviews"),
    ("rating", "rating"),
    ("opening_hours", "currentOpeningHours"),
    ("regular_opening_hours", "regularOpeningHours"),
    ("location", "location"),
    ("types", "types"),
    ("photos", "photos"),
    ("price_level", "priceLevel"),
    ("phone_number", "nationalPhoneNumber"),
    ("international_phone_number", "internationalPhoneNumber"),
    ("website", "websiteUri"),
    ("business_status", "businessStatus"),
    ("user_ratings_total", "userRatingCount"),
];

/// Build a field mask from caller field names.
///
/// Known names are mapped case-insensitively, unknown names pass through
/// unchanged, duplicates keep their first position and `id` is always
/// present (prepended when missing). With a `prefix`, every entry becomes
/// `prefix.entry`.
pub fn transform_field_mask<S: AsRef<str>>(fields: &[S], prefix: Option<&str>) -> String {
    let mut mapped: Vec<String> = Vec::with_capacity(fields.len() + 1);

    for field in fields {
        let field = field.as_ref().trim();
        if field.is_empty() {
            continue;
        }
        let lowered = field.to_ascii_lowercase();
        let name = PLACE_FIELD_NAMES
            .iter()
            .find(|(friendly, _)| *friendly == lowered)
            .map_or(field, |(_, api)| *api);

        if !mapped.iter().any(|existing| existing == name) {
            mapped.push(name.to_string());
        }
    }

    if !mapped.iter().any(|name| name == "id") {
        mapped.insert(0, "id".to_string());
    }

    match prefix {
        Some(prefix) => mapped
            .iter()
            .map(|name| format!("{prefix}.{name}"))
            .collect::<Vec<_>>()
            .join(","),
        None => mapped.join(","),
    }
}

/// Parse a protobuf duration such as `"120s"` into whole seconds.
///
/// Numbers are taken as seconds. Fractions are truncated. Anything else is 0.
pub fn parse_duration_seconds(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::String(s)) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        }
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn present(value: &Value, key: &str) -> Option<Value> {
    value.get(key).filter(|v| !v.is_null()).cloned()
}

fn string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    value.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

/// Read `{lat,lng}` or `{latitude,longitude}`.
fn coordinate_of(value: &Value) -> Option<Coordinate> {
    let lat = value
        .get("latitude")
        .or_else(|| value.get("lat"))
        .and_then(Value::as_f64)?;
    let lng = value
        .get("longitude")
        .or_else(|| value.get("lng"))
        .and_then(Value::as_f64)?;
    Some(Coordinate::new(lat, lng))
}

/// Coordinate at `pointer`, or the origin when absent.
fn coordinate_or_zero(value: &Value, pointer: &str) -> Coordinate {
    value
        .pointer(pointer)
        .and_then(coordinate_of)
        .unwrap_or(Coordinate::new(0.0, 0.0))
}

pub fn normalize_place(place: &Value) -> PlaceResult {
    let location = place
        .pointer("/geometry/location")
        .and_then(coordinate_of)
        .or_else(|| place.get("location").and_then(coordinate_of));

    let name = str_field(place, "name")
        .or_else(|| {
            place
                .pointer("/displayName/text")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Unknown".to_string());

    let editorial_summary = place
        .pointer("/editorial_summary/overview")
        .or_else(|| place.pointer("/editorialSummary/text"))
        .and_then(Value::as_str)
        .map(str::to_string);

    PlaceResult {
        id: str_field(place, "place_id")
            .or_else(|| str_field(place, "id"))
            .unwrap_or_default(),
        name,
        formatted_address: str_field(place, "formatted_address")
            .or_else(|| str_field(place, "formattedAddress")),
        address_components: present(place, "address_components")
            .or_else(|| present(place, "addressComponents")),
        location,
        rating: place.get("rating").and_then(Value::as_f64),
        user_ratings_total: place
            .get("user_ratings_total")
            .or_else(|| place.get("userRatingCount"))
            .and_then(Value::as_u64),
        price_level: present(place, "price_level").or_else(|| present(place, "priceLevel")),
        types: string_list(place, "types"),
        opening_hours: present(place, "opening_hours")
            .or_else(|| present(place, "currentOpeningHours"))
            .or_else(|| present(place, "regularOpeningHours")),
        photos: present(place, "photos"),
        reviews: present(place, "reviews"),
        editorial_summary,
        website: str_field(place, "website").or_else(|| str_field(place, "websiteUri")),
        phone_number: str_field(place, "formatted_phone_number")
            .or_else(|| str_field(place, "nationalPhoneNumber")),
        international_phone_number: str_field(place, "international_phone_number")
            .or_else(|| str_field(place, "internationalPhoneNumber")),
    }
}

/// Normalize every entry of `payload[key]`, treating a missing list as empty.
pub fn normalize_places(payload: &Value, key: &str) -> Vec<PlaceResult> {
    payload
        .get(key)
        .and_then(Value::as_array)
        .map(|places| places.iter().map(normalize_place).collect())
        .unwrap_or_default()
}

/// One geocoding hit. `location_override` replaces the hit's own geometry
/// (reverse geocoding reports the queried point). Hits without any
/// location are dropped.
pub fn normalize_geocode(
    result: &Value,
    location_override: Option<Coordinate>,
) -> Option<GeocodeResult> {
    let location = location_override.or_else(|| {
        result
            .pointer("/geometry/location")
            .and_then(coordinate_of)
    })?;

    Some(GeocodeResult {
        formatted_address: str_field(result, "formatted_address").unwrap_or_default(),
        location,
        address_components: present(result, "address_components"),
        place_id: str_field(result, "place_id"),
        types: string_list(result, "types"),
    })
}

pub fn normalize_geocode_results(
    payload: &Value,
    location_override: Option<Coordinate>,
) -> Vec<GeocodeResult> {
    payload
        .get("results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .filter_map(|r| normalize_geocode(r, location_override))
                .collect()
        })
        .unwrap_or_default()
}

fn is_directions_route(route: &Value) -> bool {
    route.get("overview_polyline").is_some()
        || route.pointer("/legs/0/distance/value").is_some()
}

/// A route from either the Routes API or the legacy Directions API.
pub fn normalize_route(route: &Value) -> RouteResult {
    if is_directions_route(route) {
        return normalize_directions_route(route);
    }

    let legs = route
        .get("legs")
        .and_then(Value::as_array)
        .map(|legs| {
            legs.iter()
                .map(|leg| RouteLeg {
                    start: coordinate_or_zero(leg, "/startLocation/latLng"),
                    end: coordinate_or_zero(leg, "/endLocation/latLng"),
                    steps: step_count(leg),
                    distance_meters: leg.get("distanceMeters").and_then(Value::as_u64).unwrap_or(0),
                    duration_seconds: parse_duration_seconds(leg.get("duration")),
                })
                .collect()
        })
        .unwrap_or_default();

    RouteResult {
        distance_meters: route.get("distanceMeters").and_then(Value::as_u64).unwrap_or(0),
        duration_seconds: parse_duration_seconds(route.get("duration")),
        duration_in_traffic_seconds: route
            .get("staticDuration")
            .map(|d| parse_duration_seconds(Some(d))),
        polyline: route
            .pointer("/polyline/encodedPolyline")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        tolls: route
            .pointer("/travelAdvisory/tollInfo")
            .map(|_| TollEstimate::placeholder()),
        legs,
    }
}

fn normalize_directions_route(route: &Value) -> RouteResult {
    let mut distance_total = 0;
    let mut duration_total = 0;
    let mut traffic_total = 0;

    let legs = route
        .get("legs")
        .and_then(Value::as_array)
        .map(|legs| {
            legs.iter()
                .map(|leg| {
                    let distance = leg.pointer("/distance/value").and_then(Value::as_u64).unwrap_or(0);
                    let duration = leg.pointer("/duration/value").and_then(Value::as_u64).unwrap_or(0);
                    distance_total += distance;
                    duration_total += duration;
                    traffic_total += leg
                        .pointer("/duration_in_traffic/value")
                        .and_then(Value::as_u64)
                        .unwrap_or(0);

                    RouteLeg {
                        start: coordinate_or_zero(leg, "/start_location"),
                        end: coordinate_or_zero(leg, "/end_location"),
                        steps: step_count(leg),
                        distance_meters: distance,
                        duration_seconds: duration,
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    RouteResult {
        distance_meters: distance_total,
        duration_seconds: duration_total,
        duration_in_traffic_seconds: (traffic_total > 0).then_some(traffic_total),
        polyline: route
            .pointer("/overview_polyline/points")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        tolls: None,
        legs,
    }
}

fn step_count(leg: &Value) -> usize {
    leg.get("steps").and_then(Value::as_array).map_or(0, Vec::len)
}

pub fn normalize_routes(payload: &Value) -> Vec<RouteResult> {
    payload
        .get("routes")
        .and_then(Value::as_array)
        .map(|routes| routes.iter().map(normalize_route).collect())
        .unwrap_or_default()
}

pub fn normalize_elevations(payload: &Value) -> Vec<ElevationResult> {
    payload
        .get("results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .filter_map(|r| {
                    Some(ElevationResult {
                        elevation: r.get("elevation").and_then(Value::as_f64)?,
                        location: r.get("location").and_then(coordinate_of)?,
                        resolution: r.get("resolution").and_then(Value::as_f64),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// `None` when the payload carries no usable location.
pub fn normalize_geolocation(payload: &Value) -> Option<GeolocationResult> {
    let location = payload.get("location").and_then(coordinate_of)?;
    let accuracy = payload
        .get("accuracy")
        .or_else(|| payload.pointer("/location/accuracy"))
        .and_then(Value::as_f64);
    Some(GeolocationResult { location, accuracy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_mask_prefixed() {
        assert_eq!(
            transform_field_mask(&["name", "rating"], Some("places")),
            "places.id,places.displayName,places.rating"
        );
    }

    #[test]
    fn test_field_mask_dedupes_and_passes_unknown() {
        assert_eq!(
            transform_field_mask(&["Opening_Hours", "id", "currentOpeningHours", "curbsidePickup"], None),
            "currentOpeningHours,id,curbsidePickup"
        );
    }

    #[test]
    fn test_field_mask_empty_input_is_id() {
        let empty: [&str; 0] = [];
        assert_eq!(transform_field_mask(&empty, None), "id");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration_seconds(Some(&json!("120s"))), 120);
        assert_eq!(parse_duration_seconds(Some(&json!("12.5s"))), 12);
        assert_eq!(parse_duration_seconds(Some(&json!("soon"))), 0);
        assert_eq!(parse_duration_seconds(Some(&json!(42))), 42);
        assert_eq!(parse_duration_seconds(None), 0);
    }

    #[test]
    fn test_legacy_and_new_place_normalize_identically() {
        let legacy = json!({
            "place_id": "ChIJ123",
            "name": "Blue Bottle",
            "formatted_address": "66 Mint St, San Francisco",
            "geometry": {"location": {"lat": 37.78, "lng": -122.40}},
            "rating": 4.5,
            "types": ["cafe", "food"]
        });
        let new = json!({
            "id": "ChIJ123",
            "displayName": {"text": "Blue Bottle", "languageCode": "en"},
            "formattedAddress": "66 Mint St, San Francisco",
            "location": {"latitude": 37.78, "longitude": -122.40},
            "rating": 4.5,
            "types": ["cafe", "food"]
        });

        let a = serde_json::to_string(&normalize_place(&legacy)).unwrap();
        let b = serde_json::to_string(&normalize_place(&new)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_place_name_falls_back_to_unknown() {
        let place = normalize_place(&json!({"id": "x"}));
        assert_eq!(place.name, "Unknown");
        assert!(place.location.is_none());
    }

    #[test]
    fn test_place_new_only_fields() {
        let place = normalize_place(&json!({
            "id": "x",
            "userRatingCount": 12,
            "priceLevel": "PRICE_LEVEL_MODERATE",
            "editorialSummary": {"text": "Cozy"},
            "websiteUri": "https://example.com",
            "nationalPhoneNumber": "(555) 010-0000"
        }));
        assert_eq!(place.user_ratings_total, Some(12));
        assert_eq!(place.price_level, Some(json!("PRICE_LEVEL_MODERATE")));
        assert_eq!(place.editorial_summary.as_deref(), Some("Cozy"));
        assert_eq!(place.website.as_deref(), Some("https://example.com"));
        assert_eq!(place.phone_number.as_deref(), Some("(555) 010-0000"));
    }

    #[test]
    fn test_routes_api_route() {
        let route = normalize_route(&json!({
            "distanceMeters": 1200,
            "duration": "300s",
            "staticDuration": "280s",
            "polyline": {"encodedPolyline": "abc"},
            "travelAdvisory": {"tollInfo": {"estimatedPrice": [{"currencyCode": "EUR", "units": "3"}]}},
            "legs": [{
                "distanceMeters": 1200,
                "duration": "300s",
                "startLocation": {"latLng": {"latitude": 1.0, "longitude": 2.0}},
                "endLocation": {"latLng": {"latitude": 3.0, "longitude": 4.0}},
                "steps": [{}, {}, {}]
            }]
        }));

        assert_eq!(route.distance_meters, 1200);
        assert_eq!(route.duration_seconds, 300);
        assert_eq!(route.duration_in_traffic_seconds, Some(280));
        assert_eq!(route.polyline, "abc");
        assert_eq!(route.tolls, Some(TollEstimate::placeholder()));
        assert_eq!(route.legs.len(), 1);
        assert_eq!(route.legs[0].steps, 3);
        assert_eq!(route.legs[0].end, Coordinate::new(3.0, 4.0));
    }

    #[test]
    fn test_route_missing_fields_default_to_zero() {
        let route = normalize_route(&json!({"legs": [{}]}));
        assert_eq!(route.distance_meters, 0);
        assert_eq!(route.duration_seconds, 0);
        assert_eq!(route.polyline, "");
        assert!(route.tolls.is_none());
        assert_eq!(route.legs[0].start, Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn test_directions_route_sums_legs() {
        let route = normalize_route(&json!({
            "overview_polyline": {"points": "xyz"},
            "legs": [
                {
                    "distance": {"value": 100}, "duration": {"value": 10},
                    "duration_in_traffic": {"value": 15},
                    "start_location": {"lat": 1.0, "lng": 1.0},
                    "end_location": {"lat": 2.0, "lng": 2.0},
                    "steps": [{}]
                },
                {"distance": {"value": 50}, "duration": {"value": 5}}
            ]
        }));
        assert_eq!(route.distance_meters, 150);
        assert_eq!(route.duration_seconds, 15);
        assert_eq!(route.duration_in_traffic_seconds, Some(15));
        assert_eq!(route.polyline, "xyz");
        assert_eq!(route.legs[1].steps, 0);
    }

    #[test]
    fn test_reverse_geocode_uses_query_location() {
        let payload = json!({"results": [{
            "formatted_address": "1 Main St",
            "geometry": {"location": {"lat": 9.0, "lng": 9.0}},
            "place_id": "p1"
        }]});
        let results = normalize_geocode_results(&payload, Some(Coordinate::new(1.0, 2.0)));
        assert_eq!(results[0].location, Coordinate::new(1.0, 2.0));

        let results = normalize_geocode_results(&payload, None);
        assert_eq!(results[0].location, Coordinate::new(9.0, 9.0));
    }

    #[test]
    fn test_elevation_and_geolocation() {
        let elevations = normalize_elevations(&json!({"results": [
            {"elevation": 1608.6, "location": {"lat": 39.7, "lng": -104.9}, "resolution": 4.7},
            {"location": {"lat": 0.0, "lng": 0.0}}
        ]}));
        assert_eq!(elevations.len(), 1);
        assert_eq!(elevations[0].resolution, Some(4.7));

        let geo = normalize_geolocation(&json!({"location": {"lat": 1.0, "lng": 2.0}, "accuracy": 50.0})).unwrap();
        assert_eq!(geo.accuracy, Some(50.0));
        assert!(normalize_geolocation(&json!({})).is_none());
    }
}
