//! End-to-end tool dispatch against a mock provider.

use maps_mcp_server::core::{Config, McpServer};
use maps_mcp_server::domains::maps::EndpointConfig;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn server_for(mock: &MockServer) -> McpServer {
    let mut config = Config::default();
    config.maps.credentials.api_key = Some("integration-key".to_string());
    config.maps.endpoints = EndpointConfig::single_host(mock.uri());
    config.maps.http.retry_base_delay_ms = 0;
    config.maps.http.timeout_secs = 5;
    config.maps.rate_limit.enabled = false;
    McpServer::new(config).unwrap()
}

async fn call(server: &McpServer, name: &str, arguments: Value) -> (bool, Value) {
    let result = server.call_tool(name, arguments).await.unwrap();
    (
        result.is_error.unwrap_or(false),
        result.structured_content.unwrap_or(Value::Null),
    )
}

#[tokio::test]
async fn geocode_search_is_cached_across_calls() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .and(query_param("address", "Berlin"))
        .and(query_param("key", "integration-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "formatted_address": "Berlin, Germany",
                "geometry": {"location": {"lat": 52.52, "lng": 13.405}},
                "place_id": "berlin",
                "types": ["locality"]
            }]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    for _ in 0..2 {
        let (is_error, content) = call(&server, "geocode_search", json!({"query": "Berlin"})).await;
        assert!(!is_error);
        assert_eq!(content["results"][0]["formatted_address"], "Berlin, Germany");
        assert_eq!(content["results"][0]["location"], json!({"lat": 52.52, "lng": 13.405}));
    }
}

#[tokio::test]
async fn transient_server_error_is_retried() {
    let mock = MockServer::start().await;
    Mock::given(path("/elevation/json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock)
        .await;
    Mock::given(path("/elevation/json"))
        .and(query_param("locations", "36.5785,-118.2923"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "elevation": 4411.9,
                "location": {"lat": 36.5785, "lng": -118.2923},
                "resolution": 19.1
            }]
        })))
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let (is_error, content) = call(
        &server,
        "elevation_get",
        json!({"locations": [{"lat": 36.5785, "lng": -118.2923}]}),
    )
    .await;

    assert!(!is_error);
    assert_eq!(content["results"][0]["elevation"], json!(4411.9));
    assert_eq!(mock.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn upstream_denial_becomes_error_envelope() {
    let mock = MockServer::start().await;
    Mock::given(path("/timezone/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let (is_error, content) = call(
        &server,
        "timezone_get",
        json!({"lat": 1.0, "lng": 2.0, "timestamp": 1700000000}),
    )
    .await;

    assert!(is_error);
    let error = &content["error"];
    assert_eq!(error["code"], "REQUEST_DENIED");
    assert_eq!(error["message"], "The provided API key is invalid.");
    assert_eq!(error["context"]["endpoint"], "/timezone/json");
    assert_eq!(error["context"]["attempts"], json!(1));
    let url = error["context"]["url"].as_str().unwrap();
    assert!(!url.contains("integration-key"));
}

#[tokio::test]
async fn places_search_text_uses_header_auth_and_translations() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(header("X-Goog-Api-Key", "integration-key"))
        .and(body_partial_json(json!({
            "textQuery": "ramen",
            "priceLevels": ["PRICE_LEVEL_INEXPENSIVE", "PRICE_LEVEL_MODERATE"],
            "locationBias": {
                "circle": {
                    "center": {"latitude": 35.68, "longitude": 139.76},
                    "radius": 2000.0
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [{
                "id": "ramen1",
                "displayName": {"text": "Ramen Bar"},
                "formattedAddress": "Tokyo",
                "location": {"latitude": 35.681, "longitude": 139.761},
                "rating": 4.6
            }]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let (is_error, content) = call(
        &server,
        "places_search_text",
        json!({
            "query": "ramen",
            "price_levels": [1, 2],
            "location_bias": {
                "circle": {"center": {"lat": 35.68, "lng": 139.76}, "radius_meters": 2000.0}
            }
        }),
    )
    .await;

    assert!(!is_error);
    assert_eq!(content["results"][0]["name"], "Ramen Bar");
    assert_eq!(content["results"][0]["id"], "ramen1");
}

#[tokio::test]
async fn nearby_find_reports_unresolvable_origin() {
    let mock = MockServer::start().await;
    Mock::given(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let (is_error, content) = call(
        &server,
        "nearby_find",
        json!({"origin": {"address": "Nowhere at all"}, "what": "cities"}),
    )
    .await;

    assert!(is_error);
    assert_eq!(content["error"]["code"], "GEOCODE_FAILED");
    assert_eq!(content["error"]["context"]["address"], "Nowhere at all");
}
