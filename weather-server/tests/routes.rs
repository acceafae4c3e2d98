//! Route tests: a real listener in front of a wiremock upstream.

use serde_json::{Value, json};
use tokio::net::TcpListener;
use weather_core::ProviderConfig;
use weather_server::{AppState, router};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Starts the router against `upstream` and returns its base URL.
async fn spawn_app(upstream: &MockServer) -> String {
    let config = ProviderConfig::new("TEST_KEY").with_base_url(format!("{}/v1", upstream.uri()));
    let state = AppState::from_config(&config).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_weather_route_passes_document_through() {
    let upstream = MockServer::start().await;
    let doc = json!({
        "location": { "name": "London" },
        "current": { "temp_c": 14.0, "air_quality": { "us-epa-index": 1 } }
    });

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("query", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(doc.clone()))
        .expect(1)
        .mount(&upstream)
        .await;

    let base = spawn_app(&upstream).await;
    let res = reqwest::get(format!("{base}/api/v1/weather?q=London")).await.unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, doc);
}

#[tokio::test]
async fn test_forecast_route_uses_forecast_endpoint() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("query", "48.85,2.35"))
        .and(query_param("days", "9"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "forecast": { "forecastday": [] } })),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let base = spawn_app(&upstream).await;
    let res = reqwest::get(format!("{base}/api/v1/getForecast?q=48.85,2.35")).await.unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["forecast"]["forecastday"], json!([]));
}

#[tokio::test]
async fn test_missing_query_is_bad_request() {
    let upstream = MockServer::start().await;
    let base = spawn_app(&upstream).await;

    for url in [
        format!("{base}/api/v1/weather"),
        format!("{base}/api/v1/getForecast?q="),
        format!("{base}/api/v1/weather/search"),
    ] {
        let res = reqwest::get(&url).await.unwrap();
        assert_eq!(res.status(), 400, "{url}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Query parameter is required" }));
    }

    let requests = upstream.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_both_query_spellings_are_accepted() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("query", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "location": {} })))
        .expect(1)
        .mount(&upstream)
        .await;

    let base = spawn_app(&upstream).await;
    let res = reqwest::get(format!("{base}/api/v1/weather?q=London&query=Paris")).await.unwrap();

    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn test_decode_failure_detail_carries_cause() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&upstream)
        .await;

    let base = spawn_app(&upstream).await;
    let res = reqwest::get(format!("{base}/api/v1/weather?q=London")).await.unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Failed to parse WeatherAPI /current.json JSON: "), "{detail}");
    assert!(detail.contains("expected value"), "{detail}");
}

#[tokio::test]
async fn test_upstream_failure_maps_to_500_with_detail() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&upstream)
        .await;

    let base = spawn_app(&upstream).await;
    let res = reqwest::get(format!("{base}/api/v1/getForecast?q=invalid-location-xyz"))
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch weather data");
    assert_eq!(body["detail"], "No matching location found.");
}

#[tokio::test]
async fn test_named_operation_route() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/astronomy.json"))
        .and(query_param("query", "Tokyo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "astronomy": { "astro": { "sunrise": "04:26 AM" } }
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let base = spawn_app(&upstream).await;
    let res = reqwest::get(format!("{base}/api/v1/weather/astronomy?query=Tokyo")).await.unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["astronomy"]["astro"]["sunrise"], "04:26 AM");
}

#[tokio::test]
async fn test_unknown_operation_is_not_found() {
    let upstream = MockServer::start().await;
    let base = spawn_app(&upstream).await;

    let res = reqwest::get(format!("{base}/api/v1/weather/tides?q=Brighton")).await.unwrap();

    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Unknown operation 'tides'");
}

#[tokio::test]
async fn test_health() {
    let upstream = MockServer::start().await;
    let base = spawn_app(&upstream).await;

    let res = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "ok");
}
