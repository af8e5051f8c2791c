//! Typed operations over the provider APIs.
//!
//! Each method builds an [`ApiRequest`], hands it to the shared
//! [`RequestExecutor`] and reshapes the payload with the normalizers.

use std::net::IpAddr;
use std::time::Duration;

use reqwest::Url;
use serde_json::{Map, Value, json};
use tracing::{debug, info, instrument};

use super::endpoints::ApiSurface;
use super::error::{
    FailureClass, GEOCODE_FAILED, INVALID_IP, INVALID_REQUEST, INVALID_RESPONSE, MapsError,
};
use super::executor::{ALL_FIELDS, ApiRequest, RequestExecutor};
use super::geo::{Coordinate, LocationBias, LocationRef, haversine_distance, join_points};
use super::normalize::{
    normalize_elevations, normalize_geocode_results, normalize_geolocation, normalize_place,
    normalize_places, normalize_routes, transform_field_mask,
};
use super::types::{
    CellTower, ElevationResult, GeocodeResult, GeolocationResult, IpGeolocationResult,
    IpGeolocationSource, IpLocation, NearbyFindResult, NearbyPlace, NearbyTarget,
    NormalizedAddress, PlaceResult, RankPreference, RoadsTravelMode, RouteWaypoint,
    RoutesResponse, RoutingPreference, TravelMode, Units, WifiAccessPoint,
};

const GEOCODE_TTL: Duration = Duration::from_secs(5 * 60);
const PLACE_SEARCH_TTL: Duration = Duration::from_secs(60);
const PLACE_DETAILS_TTL: Duration = Duration::from_secs(5 * 60);
const ELEVATION_TTL: Duration = Duration::from_secs(5 * 60);
const TIMEZONE_TTL: Duration = Duration::from_secs(60 * 60);

const PLACE_SEARCH_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.addressComponents,places.location,places.rating,places.types,places.photos";
const PLACE_DETAILS_MASK: &str = "id,displayName,formattedAddress,addressComponents,location,rating,types,photos,currentOpeningHours,priceLevel";
const ROUTES_MASK: &str = "routes.duration,routes.distanceMeters,routes.polyline.encodedPolyline,routes.legs,routes.staticDuration,routes.travelAdvisory";

pub const DEFAULT_NEARBY_RADIUS_METERS: f64 = 30_000.0;
pub const DEFAULT_NEARBY_MAX_RESULTS: u32 = 20;
/// Accuracy reported for an IP estimate when the provider gives none.
pub const DEFAULT_IP_ACCURACY_METERS: f64 = 25_000.0;

// ============================================================================
// Operation options
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct TextSearchOptions {
    pub included_types: Vec<String>,
    pub excluded_types: Vec<String>,
    pub open_now: Option<bool>,
    /// Provider price level names, e.g. `PRICE_LEVEL_MODERATE`.
    pub price_levels: Vec<String>,
    pub min_rating: Option<f64>,
    pub location_bias: Option<LocationBias>,
    pub rank_preference: Option<RankPreference>,
    pub language: Option<String>,
    pub region: Option<String>,
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct NearbySearchOptions {
    pub included_types: Vec<String>,
    pub max_results: Option<u32>,
    pub language: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AutocompleteOptions {
    pub session_token: Option<String>,
    pub location_bias: Option<LocationBias>,
    pub included_types: Vec<String>,
    pub language: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DetailsOptions {
    /// Friendly field names; the default mask applies when empty.
    pub fields: Vec<String>,
    pub language: Option<String>,
    pub region: Option<String>,
    pub session_token: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    pub waypoints: Vec<RouteWaypoint>,
    pub travel_mode: Option<TravelMode>,
    pub routing_preference: Option<RoutingPreference>,
    pub compute_alternative_routes: bool,
    pub avoid_tolls: bool,
    pub avoid_highways: bool,
    pub avoid_ferries: bool,
    pub language: Option<String>,
    pub region: Option<String>,
    pub units: Option<Units>,
}

#[derive(Debug, Clone, Default)]
pub struct MatrixOptions {
    pub travel_mode: Option<TravelMode>,
    pub routing_preference: Option<RoutingPreference>,
    pub language: Option<String>,
    pub region: Option<String>,
    pub units: Option<Units>,
}

/// Points to sample elevation at.
#[derive(Debug, Clone)]
pub enum ElevationQuery {
    Locations(Vec<Coordinate>),
    /// An encoded polyline or `lat,lng|lat,lng` path, sampled `samples` times.
    Path { path: String, samples: Option<u32> },
}

#[derive(Debug, Clone, Default)]
pub struct GeolocationRequest {
    pub wifi_access_points: Vec<WifiAccessPoint>,
    pub cell_towers: Vec<CellTower>,
    /// Fall back to the caller IP. Defaults to true.
    pub consider_ip: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NearbyFindRequest {
    pub origin: LocationRef,
    pub what: NearbyTarget,
    pub included_types: Option<Vec<String>>,
    pub radius_meters: Option<f64>,
    pub max_results: Option<u32>,
    pub language: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct IpGeolocateRequest {
    pub reverse_geocode: bool,
    pub language: Option<String>,
    pub ip_override: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Entry point for every maps operation.
#[derive(Debug)]
pub struct MapsClient {
    executor: RequestExecutor,
}

impl MapsClient {
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    #[instrument(skip_all, fields(query = %query))]
    pub async fn geocode_search(
        &self,
        query: &str,
        region: Option<&str>,
        language: Option<&str>,
    ) -> Result<Vec<GeocodeResult>, MapsError> {
        let request = ApiRequest::get(ApiSurface::Legacy, "/geocode/json")
            .param("address", query)
            .param_opt("region", region)
            .param_opt("language", language)
            .cache_for(GEOCODE_TTL);

        let payload = self.executor.execute(&request).await?;
        Ok(normalize_geocode_results(&payload, None))
    }

    /// Results report `location` as their coordinate, not the matched feature's.
    #[instrument(skip_all, fields(lat = location.lat, lng = location.lng))]
    pub async fn geocode_reverse(
        &self,
        location: Coordinate,
        language: Option<&str>,
    ) -> Result<Vec<GeocodeResult>, MapsError> {
        let request = ApiRequest::get(ApiSurface::Legacy, "/geocode/json")
            .param("latlng", location.to_query_value())
            .param_opt("language", language)
            .cache_for(GEOCODE_TTL);

        let payload = self.executor.execute(&request).await?;
        Ok(normalize_geocode_results(&payload, Some(location)))
    }

    #[instrument(skip_all, fields(query = %query))]
    pub async fn places_search_text(
        &self,
        query: &str,
        options: &TextSearchOptions,
    ) -> Result<Vec<PlaceResult>, MapsError> {
        let mut body = Map::new();
        body.insert("textQuery".into(), query.into());
        insert_list(&mut body, "includedTypes", &options.included_types);
        insert_list(&mut body, "excludedTypes", &options.excluded_types);
        insert_opt(&mut body, "openNow", options.open_now);
        insert_list(&mut body, "priceLevels", &options.price_levels);
        insert_opt(&mut body, "minRating", options.min_rating.filter(|r| *r > 0.0));
        insert_opt(
            &mut body,
            "locationBias",
            options.location_bias.as_ref().map(LocationBias::to_provider_value),
        );
        insert_opt(
            &mut body,
            "rankPreference",
            options.rank_preference.map(enum_value),
        );
        insert_locale(&mut body, &options.language, &options.region);
        insert_opt(&mut body, "maxResultCount", options.max_results);

        let request = ApiRequest::post(
            ApiSurface::Places,
            "/v1/places:searchText",
            Value::Object(body),
        )
        .field_mask(PLACE_SEARCH_MASK)
        .cache_for(PLACE_SEARCH_TTL);

        let payload = self.executor.execute(&request).await?;
        Ok(normalize_places(&payload, "places"))
    }

    #[instrument(skip_all, fields(lat = center.lat, lng = center.lng, radius_meters = radius_meters))]
    pub async fn places_nearby(
        &self,
        center: Coordinate,
        radius_meters: f64,
        options: &NearbySearchOptions,
    ) -> Result<Vec<PlaceResult>, MapsError> {
        let mut body = Map::new();
        body.insert(
            "locationRestriction".into(),
            json!({
                "circle": {
                    "center": center.to_lat_lng_literal(),
                    "radius": radius_meters,
                }
            }),
        );
        insert_list(&mut body, "includedTypes", &options.included_types);
        insert_opt(&mut body, "maxResultCount", options.max_results);
        insert_locale(&mut body, &options.language, &options.region);

        let request = ApiRequest::post(
            ApiSurface::Places,
            "/v1/places:searchNearby",
            Value::Object(body),
        )
        .field_mask(PLACE_SEARCH_MASK)
        .cache_for(PLACE_SEARCH_TTL);

        let payload = self.executor.execute(&request).await?;
        Ok(normalize_places(&payload, "places"))
    }

    /// Raw suggestions. Session scoped, so never cached.
    #[instrument(skip_all, fields(input = %input))]
    pub async fn places_autocomplete(
        &self,
        input: &str,
        options: &AutocompleteOptions,
    ) -> Result<Vec<Value>, MapsError> {
        let mut body = Map::new();
        body.insert("input".into(), input.into());
        insert_opt(&mut body, "sessionToken", options.session_token.clone());
        insert_opt(
            &mut body,
            "locationBias",
            options.location_bias.as_ref().map(LocationBias::to_provider_value),
        );
        insert_list(&mut body, "includedTypes", &options.included_types);
        insert_locale(&mut body, &options.language, &options.region);

        let request = ApiRequest::post(
            ApiSurface::Places,
            "/v1/places:autocomplete",
            Value::Object(body),
        );

        let payload = self.executor.execute(&request).await?;
        Ok(payload
            .get("suggestions")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    #[instrument(skip_all, fields(place_id = %place_id))]
    pub async fn places_details(
        &self,
        place_id: &str,
        options: &DetailsOptions,
    ) -> Result<PlaceResult, MapsError> {
        let place_id = place_id.trim();
        if !is_place_id(place_id) {
            return Err(MapsError::invalid_input(
                INVALID_REQUEST,
                "place_id must be a non-empty place identifier",
            )
            .with_context("place_id", place_id));
        }

        let mask = if options.fields.is_empty() {
            PLACE_DETAILS_MASK.to_string()
        } else {
            transform_field_mask(&options.fields, None)
        };

        let request = ApiRequest::get(ApiSurface::Places, format!("/v1/places/{place_id}"))
            .param_opt("languageCode", options.language.as_deref())
            .param_opt("regionCode", options.region.as_deref())
            .param_opt("sessionToken", options.session_token.as_deref())
            .field_mask(mask)
            .cache_for(PLACE_DETAILS_TTL);

        let payload = self.executor.execute(&request).await?;
        Ok(normalize_place(&payload))
    }

    /// Signed photo URL. Pure URL construction, no request is made.
    pub fn places_photo_url(
        &self,
        photo_reference: &str,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> Result<String, MapsError> {
        if photo_reference.trim().is_empty() {
            return Err(MapsError::invalid_input(
                INVALID_REQUEST,
                "photo_reference must not be empty",
            ));
        }

        let mut params: Vec<(&str, String)> = vec![("photoreference", photo_reference.to_string())];
        if let Some(width) = max_width {
            params.push(("maxwidth", width.to_string()));
        }
        if let Some(height) = max_height {
            params.push(("maxheight", height.to_string()));
        }
        params.push(("key", self.executor.api_key().to_string()));

        let base = self
            .executor
            .endpoints()
            .url_for(ApiSurface::Legacy, "/place/photo");
        let url = Url::parse_with_params(&base, &params)
            .map_err(|e| MapsError::internal(format!("Invalid photo URL: {e}")))?;
        Ok(url.to_string())
    }

    #[instrument(skip_all)]
    pub async fn routes_compute(
        &self,
        origin: &LocationRef,
        destination: &LocationRef,
        options: &RouteOptions,
    ) -> Result<RoutesResponse, MapsError> {
        let travel_mode = options.travel_mode.unwrap_or_default();

        let mut body = Map::new();
        body.insert("origin".into(), origin.to_route_waypoint());
        body.insert("destination".into(), destination.to_route_waypoint());
        body.insert("travelMode".into(), enum_value(travel_mode));
        insert_opt(
            &mut body,
            "routingPreference",
            routing_preference(travel_mode, options.routing_preference),
        );
        if !options.waypoints.is_empty() {
            body.insert(
                "intermediates".into(),
                options
                    .waypoints
                    .iter()
                    .map(RouteWaypoint::to_provider_value)
                    .collect(),
            );
        }
        if options.compute_alternative_routes {
            body.insert("computeAlternativeRoutes".into(), true.into());
        }

        let mut modifiers = Map::new();
        for (flag, name) in [
            (options.avoid_tolls, "avoidTolls"),
            (options.avoid_highways, "avoidHighways"),
            (options.avoid_ferries, "avoidFerries"),
        ] {
            if flag {
                modifiers.insert(name.into(), true.into());
            }
        }
        if !modifiers.is_empty() {
            body.insert("routeModifiers".into(), Value::Object(modifiers));
        }

        insert_locale(&mut body, &options.language, &options.region);
        insert_opt(&mut body, "units", options.units.map(enum_value));

        let request = ApiRequest::post(
            ApiSurface::Routes,
            "/directions/v2:computeRoutes",
            Value::Object(body),
        )
        .field_mask(ROUTES_MASK);

        let payload = self.executor.execute(&request).await?;
        Ok(RoutesResponse {
            routes: normalize_routes(&payload),
        })
    }

    /// Raw matrix elements as returned by the provider.
    #[instrument(skip_all, fields(origins = origins.len(), destinations = destinations.len()))]
    pub async fn routes_matrix(
        &self,
        origins: &[LocationRef],
        destinations: &[LocationRef],
        options: &MatrixOptions,
    ) -> Result<Value, MapsError> {
        if origins.is_empty() || destinations.is_empty() {
            return Err(MapsError::invalid_input(
                INVALID_REQUEST,
                "At least one origin and one destination are required",
            ));
        }

        let travel_mode = options.travel_mode.unwrap_or_default();
        let as_matrix_waypoints = |points: &[LocationRef]| -> Value {
            points
                .iter()
                .map(|p| json!({ "waypoint": p.to_route_waypoint() }))
                .collect()
        };

        let mut body = Map::new();
        body.insert("origins".into(), as_matrix_waypoints(origins));
        body.insert("destinations".into(), as_matrix_waypoints(destinations));
        body.insert("travelMode".into(), enum_value(travel_mode));
        insert_opt(
            &mut body,
            "routingPreference",
            routing_preference(travel_mode, options.routing_preference),
        );
        insert_locale(&mut body, &options.language, &options.region);
        insert_opt(&mut body, "units", options.units.map(enum_value));

        let request = ApiRequest::post(
            ApiSurface::Routes,
            "/distanceMatrix/v2:computeRouteMatrix",
            Value::Object(body),
        )
        .field_mask(ALL_FIELDS);

        self.executor.execute(&request).await
    }

    #[instrument(skip_all)]
    pub async fn elevation_get(
        &self,
        query: &ElevationQuery,
    ) -> Result<Vec<ElevationResult>, MapsError> {
        let request = ApiRequest::get(ApiSurface::Legacy, "/elevation/json");
        let request = match query {
            ElevationQuery::Locations(points) if !points.is_empty() => {
                request.param("locations", join_points(points))
            }
            ElevationQuery::Path { path, samples } if !path.trim().is_empty() => request
                .param("path", path)
                .param_opt("samples", *samples),
            _ => {
                return Err(MapsError::invalid_input(
                    INVALID_REQUEST,
                    "Either locations or a path is required",
                ));
            }
        };

        let payload = self
            .executor
            .execute(&request.cache_for(ELEVATION_TTL))
            .await?;
        Ok(normalize_elevations(&payload))
    }

    /// Raw time zone payload. `timestamp` defaults to now.
    #[instrument(skip_all, fields(lat = location.lat, lng = location.lng))]
    pub async fn timezone_get(
        &self,
        location: Coordinate,
        timestamp: Option<i64>,
        language: Option<&str>,
    ) -> Result<Value, MapsError> {
        let timestamp = timestamp.unwrap_or_else(|| chrono::Utc::now().timestamp());
        let request = ApiRequest::get(ApiSurface::Legacy, "/timezone/json")
            .param("location", location.to_query_value())
            .param("timestamp", timestamp)
            .param_opt("language", language)
            .cache_for(TIMEZONE_TTL);

        self.executor.execute(&request).await
    }

    #[instrument(skip_all)]
    pub async fn geolocation_estimate(
        &self,
        request: &GeolocationRequest,
    ) -> Result<GeolocationResult, MapsError> {
        let mut body = Map::new();
        body.insert(
            "considerIp".into(),
            request.consider_ip.unwrap_or(true).into(),
        );
        if !request.wifi_access_points.is_empty() {
            body.insert(
                "wifiAccessPoints".into(),
                request
                    .wifi_access_points
                    .iter()
                    .map(WifiAccessPoint::to_provider_value)
                    .collect(),
            );
        }
        if !request.cell_towers.is_empty() {
            body.insert(
                "cellTowers".into(),
                request
                    .cell_towers
                    .iter()
                    .map(CellTower::to_provider_value)
                    .collect(),
            );
        }

        let api_request = ApiRequest::post(
            ApiSurface::Geolocation,
            "/geolocation/v1/geolocate",
            Value::Object(body),
        );
        let payload = self.executor.execute(&api_request).await?;

        normalize_geolocation(&payload).ok_or_else(|| {
            MapsError::new(
                FailureClass::Upstream,
                INVALID_RESPONSE,
                "Geolocation response carried no location",
            )
            .with_context("endpoint", api_request.path())
        })
    }

    /// Raw snapped points. Never cached.
    #[instrument(skip_all, fields(points = points.len()))]
    pub async fn roads_nearest(
        &self,
        points: &[Coordinate],
        travel_mode: Option<RoadsTravelMode>,
    ) -> Result<Value, MapsError> {
        if points.is_empty() {
            return Err(MapsError::invalid_input(
                INVALID_REQUEST,
                "At least one point is required",
            ));
        }

        let request = ApiRequest::get(ApiSurface::Roads, "/v1/nearestRoads")
            .param("points", join_points(points))
            .param_opt("travelMode", travel_mode.map(RoadsTravelMode::as_str));

        self.executor.execute(&request).await
    }

    /// Places around an origin, nearest first.
    #[instrument(skip_all, fields(what = ?request.what))]
    pub async fn nearby_find(
        &self,
        request: &NearbyFindRequest,
    ) -> Result<NearbyFindResult, MapsError> {
        let origin = self.resolve_origin(&request.origin).await?;
        let radius_meters = request.radius_meters.unwrap_or(DEFAULT_NEARBY_RADIUS_METERS);

        let included_types: Vec<String> = match request.what {
            NearbyTarget::Cities => vec!["locality".into(), "administrative_area_level_1".into()],
            NearbyTarget::Towns => vec!["locality".into(), "administrative_area_level_3".into()],
            NearbyTarget::Pois | NearbyTarget::Custom => request
                .included_types
                .clone()
                .filter(|types| !types.is_empty())
                .unwrap_or_else(|| vec!["point_of_interest".into()]),
        };

        let options = NearbySearchOptions {
            included_types,
            max_results: Some(request.max_results.unwrap_or(DEFAULT_NEARBY_MAX_RESULTS)),
            language: request.language.clone(),
            region: request.region.clone(),
        };
        let places = self.places_nearby(origin, radius_meters, &options).await?;

        let mut results: Vec<NearbyPlace> = places
            .into_iter()
            .map(|place| {
                let distance = place
                    .location
                    .map_or(0.0, |location| haversine_distance(origin, location));
                NearbyPlace {
                    kind: place
                        .types
                        .as_ref()
                        .and_then(|types| types.first().cloned())
                        .unwrap_or_else(|| "unknown".to_string()),
                    id: place.id,
                    name: place.name,
                    location: place.location,
                    distance_meters: distance.round() as u64,
                    formatted_address: place.formatted_address,
                }
            })
            .collect();
        results.sort_by_key(|place| place.distance_meters);

        debug!(count = results.len(), "Nearby places ranked");
        Ok(NearbyFindResult {
            origin,
            results,
            next_page_token: None,
        })
    }

    async fn resolve_origin(&self, origin: &LocationRef) -> Result<Coordinate, MapsError> {
        let address = match origin {
            LocationRef::Coordinate(c) => return Ok(*c),
            LocationRef::Address { address } => address,
        };

        let results = match self.geocode_search(address, None, None).await {
            Ok(results) => results,
            Err(e) if e.kind == "ZERO_RESULTS" => Vec::new(),
            Err(e) => return Err(e),
        };

        results.first().map(|r| r.location).ok_or_else(|| {
            MapsError::new(
                FailureClass::Upstream,
                GEOCODE_FAILED,
                "Could not geocode origin address",
            )
            .with_context("address", address.as_str())
        })
    }

    /// Approximate location of the calling network.
    #[instrument(skip_all, fields(reverse_geocode = request.reverse_geocode))]
    pub async fn ip_geolocate(
        &self,
        request: &IpGeolocateRequest,
    ) -> Result<IpGeolocationResult, MapsError> {
        if let Some(ip) = &request.ip_override {
            if !is_public_ip(ip) {
                return Err(MapsError::invalid_input(
                    INVALID_IP,
                    "Invalid IP address format",
                ));
            }
        }

        let estimate = self
            .geolocation_estimate(&GeolocationRequest {
                consider_ip: Some(true),
                ..GeolocationRequest::default()
            })
            .await?;

        let normalized_address = if request.reverse_geocode {
            match self
                .geocode_reverse(estimate.location, request.language.as_deref())
                .await
            {
                Ok(results) => results.into_iter().next().map(|r| NormalizedAddress {
                    formatted_address: r.formatted_address,
                    address_components: r.address_components,
                }),
                Err(e) if e.kind == "ZERO_RESULTS" => None,
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        info!(
            lat = estimate.location.lat,
            lng = estimate.location.lng,
            "IP geolocation resolved"
        );

        Ok(IpGeolocationResult {
            method: "geolocation_api_ip".to_string(),
            approximate: true,
            location: IpLocation {
                lat: estimate.location.lat,
                lng: estimate.location.lng,
                accuracy_radius_meters: estimate.accuracy.unwrap_or(DEFAULT_IP_ACCURACY_METERS),
            },
            normalized_address,
            source: IpGeolocationSource {
                provider: "google".to_string(),
                reverse_geocode: request.reverse_geocode,
                ip_override_attempted: request.ip_override.is_some(),
            },
        })
    }
}

/// Public IPv4 addresses and any IPv6 address are accepted.
///
/// IPv4 in 10/8, 172.16/12, 192.168/16 and 127/8 is rejected.
pub fn is_public_ip(candidate: &str) -> bool {
    match candidate.trim().parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => !(v4.is_private() || v4.is_loopback()),
        Ok(IpAddr::V6(_)) => true,
        Err(_) => false,
    }
}

/// Routing preference is only meaningful for driving. It is defaulted there
/// and sent elsewhere only when the caller asked for one.
fn routing_preference(
    mode: TravelMode,
    requested: Option<RoutingPreference>,
) -> Option<Value> {
    match (mode, requested) {
        (TravelMode::Drive, requested) => Some(enum_value(requested.unwrap_or_default())),
        (_, Some(requested)) => Some(enum_value(requested)),
        (_, None) => None,
    }
}

/// Provider spelling of a request enum.
fn enum_value<T: serde::Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn insert_opt<T: Into<Value>>(body: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        body.insert(key.to_string(), value.into());
    }
}

fn insert_list(body: &mut Map<String, Value>, key: &str, values: &[String]) {
    if !values.is_empty() {
        body.insert(key.to_string(), values.to_vec().into());
    }
}

fn insert_locale(body: &mut Map<String, Value>, language: &Option<String>, region: &Option<String>) {
    insert_opt(body, "languageCode", language.clone());
    insert_opt(body, "regionCode", region.clone());
}

/// Place ids are URL-safe base64: letters, digits, `-` and `_`.
fn is_place_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::maps::endpoints::EndpointConfig;
    use crate::domains::maps::executor::{FIELD_MASK_HEADER, HttpConfig};
    use crate::domains::maps::rate_limiter::RateLimitConfig;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str) -> MapsClient {
        let executor = RequestExecutor::new(
            "test-key",
            &HttpConfig {
                timeout_secs: 5,
                max_attempts: 3,
                retry_base_delay_ms: 0,
            },
            &RateLimitConfig {
                enabled: false,
                ..RateLimitConfig::default()
            },
            EndpointConfig::single_host(base_url),
        )
        .unwrap();
        MapsClient::new(executor)
    }

    fn geocode_payload(lat: f64, lng: f64) -> Value {
        json!({
            "status": "OK",
            "results": [{
                "formatted_address": "Somewhere",
                "geometry": {"location": {"lat": lat, "lng": lng}},
                "place_id": "p1",
                "types": ["locality"]
            }]
        })
    }

    #[test]
    fn test_is_public_ip() {
        assert!(is_public_ip("8.8.8.8"));
        assert!(is_public_ip("172.32.0.1"));
        assert!(is_public_ip("2001:4860:4860::8888"));
        assert!(!is_public_ip("10.1.2.3"));
        assert!(!is_public_ip("172.16.0.1"));
        assert!(!is_public_ip("192.168.1.1"));
        assert!(!is_public_ip("127.0.0.1"));
        assert!(!is_public_ip("999.1.1.1"));
        assert!(!is_public_ip("not-an-ip"));
    }

    #[test]
    fn test_routing_preference_rules() {
        assert_eq!(
            routing_preference(TravelMode::Drive, None),
            Some(json!("TRAFFIC_AWARE"))
        );
        assert_eq!(routing_preference(TravelMode::Walk, None), None);
        assert_eq!(
            routing_preference(TravelMode::Transit, Some(RoutingPreference::TrafficUnaware)),
            Some(json!("TRAFFIC_UNAWARE"))
        );
    }

    #[test]
    fn test_photo_url_is_pure() {
        let client = client_for("https://maps.example.test/maps/api");
        let url = client
            .places_photo_url("ref123", Some(400), None)
            .unwrap();
        assert_eq!(
            url,
            "https://maps.example.test/maps/api/place/photo?photoreference=ref123&maxwidth=400&key=test-key"
        );
        assert!(client.places_photo_url("  ", None, None).is_err());
    }

    #[tokio::test]
    async fn test_geocode_search_normalizes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .and(query_param("address", "Paris"))
            .and(query_param("region", "fr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(geocode_payload(48.85, 2.35)))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let results = client
            .geocode_search("Paris", Some("fr"), None)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].location, Coordinate::new(48.85, 2.35));
        assert_eq!(results[0].place_id.as_deref(), Some("p1"));
    }

    #[tokio::test]
    async fn test_places_details_mask_and_locale() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/places/ChIJabc"))
            .and(query_param("languageCode", "de"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "ChIJabc",
                "displayName": {"text": "Cafe"},
                "rating": 4.1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let options = DetailsOptions {
            fields: vec!["name".into(), "rating".into()],
            language: Some("de".into()),
            ..DetailsOptions::default()
        };
        let place = client.places_details("ChIJabc", &options).await.unwrap();
        assert_eq!(place.name, "Cafe");
        assert_eq!(place.rating, Some(4.1));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            requests[0].headers.get(FIELD_MASK_HEADER).unwrap(),
            "id,displayName,rating"
        );
    }

    #[tokio::test]
    async fn test_places_details_rejects_bad_id() {
        let client = client_for("http://127.0.0.1:1");
        let err = client
            .places_details("", &DetailsOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, INVALID_REQUEST);

        for id in ["a/b", "ChIJ?fields=*", "ChIJ#frag", "ChIJ abc", "%2F"] {
            let err = client
                .places_details(id, &DetailsOptions::default())
                .await
                .unwrap_err();
            assert_eq!(err.kind, INVALID_REQUEST, "{id}");
            assert_eq!(err.context["place_id"], json!(id));
        }
    }

    #[tokio::test]
    async fn test_routes_compute_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/directions/v2:computeRoutes"))
            .and(body_partial_json(json!({
                "origin": {"address": "Paris"},
                "destination": {"location": {"latLng": {"latitude": 45.76, "longitude": 4.83}}},
                "travelMode": "DRIVE",
                "routingPreference": "TRAFFIC_AWARE",
                "intermediates": [{"address": "Dijon", "via": true}],
                "routeModifiers": {"avoidTolls": true}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "routes": [{"distanceMeters": 465000, "duration": "16200s", "polyline": {"encodedPolyline": "p"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let options = RouteOptions {
            waypoints: vec![RouteWaypoint {
                location: LocationRef::Address {
                    address: "Dijon".into(),
                },
                via: true,
            }],
            avoid_tolls: true,
            ..RouteOptions::default()
        };
        let response = client
            .routes_compute(
                &LocationRef::Address {
                    address: "Paris".into(),
                },
                &LocationRef::from(Coordinate::new(45.76, 4.83)),
                &options,
            )
            .await
            .unwrap();
        assert_eq!(response.routes[0].duration_seconds, 16200);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            requests[0].headers.get(FIELD_MASK_HEADER).unwrap(),
            ROUTES_MASK
        );
    }

    #[tokio::test]
    async fn test_timezone_defaults_timestamp() {
        let server = MockServer::start().await;
        Mock::given(path("/timezone/json"))
            .and(query_param("location", "40.7,-74"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK", "timeZoneId": "America/New_York"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let before = chrono::Utc::now().timestamp();
        let payload = client
            .timezone_get(Coordinate::new(40.7, -74.0), None, None)
            .await
            .unwrap();
        assert_eq!(payload["timeZoneId"], "America/New_York");

        let received = server.received_requests().await.unwrap();
        let timestamp: i64 = received[0]
            .url
            .query_pairs()
            .find(|(k, _)| k == "timestamp")
            .map(|(_, v)| v.parse().unwrap())
            .unwrap();
        assert!(timestamp >= before);
    }

    #[tokio::test]
    async fn test_elevation_requires_input() {
        let client = client_for("http://127.0.0.1:1");
        let err = client
            .elevation_get(&ElevationQuery::Locations(Vec::new()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_nearby_find_sorts_by_distance() {
        let server = MockServer::start().await;
        Mock::given(path("/v1/places:searchNearby"))
            .and(body_partial_json(json!({
                "includedTypes": ["locality", "administrative_area_level_1"],
                "maxResultCount": 20,
                "locationRestriction": {"circle": {"radius": 30000.0}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "places": [
                    {"id": "far", "displayName": {"text": "Far"}, "location": {"latitude": 1.0, "longitude": 0.0}, "types": ["locality"]},
                    {"id": "near", "displayName": {"text": "Near"}, "location": {"latitude": 0.1, "longitude": 0.0}},
                    {"id": "nowhere", "displayName": {"text": "Nowhere"}}
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let result = client
            .nearby_find(&NearbyFindRequest {
                origin: LocationRef::from(Coordinate::new(0.0, 0.0)),
                what: NearbyTarget::Cities,
                included_types: None,
                radius_meters: None,
                max_results: None,
                language: None,
                region: None,
            })
            .await
            .unwrap();

        let ids: Vec<&str> = result.results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["nowhere", "near", "far"]);
        assert_eq!(result.results[0].distance_meters, 0);
        assert_eq!(result.results[0].kind, "unknown");
        assert_eq!(result.results[2].kind, "locality");
        assert!((result.results[1].distance_meters as f64 - 11_119.0).abs() < 10.0);
        assert!(result.next_page_token.is_none());
    }

    #[tokio::test]
    async fn test_nearby_find_unresolvable_address() {
        let server = MockServer::start().await;
        Mock::given(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ZERO_RESULTS", "results": []})))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .nearby_find(&NearbyFindRequest {
                origin: LocationRef::Address {
                    address: "nowhere at all".into(),
                },
                what: NearbyTarget::Pois,
                included_types: None,
                radius_meters: None,
                max_results: None,
                language: None,
                region: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, GEOCODE_FAILED);
        assert_eq!(err.context["address"], json!("nowhere at all"));
    }

    #[tokio::test]
    async fn test_ip_geolocate_rejects_private_override() {
        let client = client_for("http://127.0.0.1:1");
        let err = client
            .ip_geolocate(&IpGeolocateRequest {
                ip_override: Some("192.168.0.10".into()),
                ..IpGeolocateRequest::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, INVALID_IP);
    }

    #[tokio::test]
    async fn test_ip_geolocate_with_reverse_geocode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/geolocation/v1/geolocate"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({"considerIp": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "location": {"lat": 37.42, "lng": -122.08}
            })))
            .mount(&server)
            .await;
        Mock::given(path("/geocode/json"))
            .and(query_param("latlng", "37.42,-122.08"))
            .respond_with(ResponseTemplate::new(200).set_body_json(geocode_payload(37.0, -122.0)))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let result = client
            .ip_geolocate(&IpGeolocateRequest {
                reverse_geocode: true,
                ip_override: Some("8.8.8.8".into()),
                ..IpGeolocateRequest::default()
            })
            .await
            .unwrap();

        assert_eq!(result.method, "geolocation_api_ip");
        assert!(result.approximate);
        assert_eq!(result.location.accuracy_radius_meters, DEFAULT_IP_ACCURACY_METERS);
        assert_eq!(
            result.normalized_address.unwrap().formatted_address,
            "Somewhere"
        );
        assert!(result.source.ip_override_attempted);
        assert!(result.source.reverse_geocode);
    }

    #[tokio::test]
    async fn test_roads_nearest_query() {
        let server = MockServer::start().await;
        Mock::given(path("/v1/nearestRoads"))
            .and(query_param("points", "60.17,24.94|60.18,24.95"))
            .and(query_param("travelMode", "WALKING"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"snappedPoints": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let points = [Coordinate::new(60.17, 24.94), Coordinate::new(60.18, 24.95)];
        let payload = client
            .roads_nearest(&points, Some(RoadsTravelMode::Walking))
            .await
            .unwrap();
        assert_eq!(payload, json!({"snappedPoints": []}));
    }
}
