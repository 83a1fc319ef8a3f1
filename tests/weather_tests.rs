// Weather tool tests against an in-process Open-Meteo stand-in

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use identity_assistant::application::tooling::{Tool, ToolError};
use identity_assistant::config::WeatherConfig;
use identity_assistant::infrastructure::weather::{
    WeatherClient, WeatherError, WeatherReport, WeatherTool,
};
use serde_json::{Value, json};
use std::collections::HashMap;

async fn geocode(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    match params.get("name").map(String::as_str) {
        Some("Berlin") => Json(json!({
            "results": [ { "latitude": 52.52, "longitude": 13.41, "name": "Berlin" } ]
        })),
        _ => Json(json!({ "generationtime_ms": 0.2 })),
    }
}

async fn forecast(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(params.get("latitude").map(String::as_str), Some("52.52"));
    assert!(params["current"].contains("weather_code"));
    Json(json!({
        "current": {
            "time": "2024-01-01T12:00",
            "temperature_2m": 4.5,
            "apparent_temperature": 1.2,
            "relative_humidity_2m": 81.0,
            "wind_speed_10m": 14.3,
            "wind_gusts_10m": 28.1,
            "weather_code": 3
        }
    }))
}

async fn spawn_open_meteo() -> WeatherConfig {
    let app = Router::new()
        .route("/v1/search", get(geocode))
        .route("/v1/forecast", get(forecast))
        .route("/broken/forecast", get(|| async { StatusCode::BAD_GATEWAY }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    WeatherConfig {
        geocoding_url: format!("http://{addr}/v1/search"),
        forecast_url: format!("http://{addr}/v1/forecast"),
    }
}

#[tokio::test]
async fn reports_current_conditions() {
    let config = spawn_open_meteo().await;
    let report = WeatherClient::from_config(&config)
        .current("Berlin")
        .await
        .expect("report");

    assert_eq!(
        report,
        WeatherReport {
            temperature: 4.5,
            feels_like: 1.2,
            humidity: 81.0,
            wind_speed: 14.3,
            wind_gust: 28.1,
            conditions: "Overcast".to_string(),
            location: "Berlin".to_string(),
        }
    );
}

#[tokio::test]
async fn unknown_location_is_reported() {
    let config = spawn_open_meteo().await;
    let err = WeatherClient::from_config(&config)
        .current("Atlantis")
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::LocationNotFound(location) if location == "Atlantis"));
}

#[tokio::test]
async fn upstream_failures_surface_as_http_errors() {
    let mut config = spawn_open_meteo().await;
    config.forecast_url = config.forecast_url.replace("/v1/forecast", "/broken/forecast");

    let err = WeatherClient::from_config(&config)
        .current("Berlin")
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Http(_)));
}

#[tokio::test]
async fn tool_returns_camel_case_report() {
    let config = spawn_open_meteo().await;
    let tool = WeatherTool::from_config(&config);

    let value = tool
        .execute(json!({ "location": "Berlin" }))
        .await
        .expect("value");
    assert_eq!(value["feelsLike"], 1.2);
    assert_eq!(value["windSpeed"], 14.3);
    assert_eq!(value["conditions"], "Overcast");
    assert_eq!(tool.name(), "get-weather");
    assert!(tool.input_schema().is_some());
}

#[tokio::test]
async fn tool_requires_a_location() {
    let tool = WeatherTool::from_config(&WeatherConfig::default());

    for context in [json!({}), json!({ "location": "  " }), json!({ "location": 7 })] {
        let err = tool.execute(context).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput { .. }));
    }
}
