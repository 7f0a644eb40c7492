#![allow(dead_code)]

use axum::{
    body::Body,
    extract::Query,
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use tower::ServiceExt;
use veridian_backend::{create_app, external::PollutionApiClient, AppState, Config};

/// Address nothing listens on
pub const UNREACHABLE_UPSTREAM: &str = "http://127.0.0.1:9";

pub fn create_test_app(upstream: &str) -> Router {
    let client = PollutionApiClient::with_base_url(upstream.to_string());
    create_app(AppState::new(Config::default(), client))
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Serve a fixed Backend Data API on an ephemeral port, returning its base URL
pub async fn spawn_stub_upstream() -> String {
    let stub = Router::new()
        .route("/api/pollution/current", get(stub_current))
        .route("/api/pollution/history", get(stub_history))
        .route("/api/pollution/map", get(stub_map))
        .route("/api/prediction/yearly", get(stub_yearly))
        .route("/api/prediction/forecast", get(stub_forecast));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn stub_current(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let location = params
        .get("location")
        .cloned()
        .unwrap_or_else(|| "New Delhi, India".to_string());
    Json(json!({
        "id": "poll_1234",
        "location": location,
        "latitude": 28.6139,
        "longitude": 77.209,
        "date": "2026-03-01T10:30:00",
        "pm25": 85.0,
        "pm10": 127.5,
        "no2": 45.0,
        "o3": 30.0,
        "co": 850.0,
        "temperature": 28.0,
        "humidity": 55.0,
        "aqi": 181,
        "pollutionIndex": 500.0
    }))
}

async fn stub_history(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "location": params.get("location"),
        "history": [
            {"date": "2026-03-03T00:00:00", "pm25": 40.0, "aqi": 112},
            {"date": "2026-03-01T00:00:00", "pm25": 10.0, "aqi": 41},
            {"date": "2026-03-02T00:00:00", "pm25": 85.0, "aqi": 181}
        ]
    }))
}

async fn stub_map(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let south: f64 = params["south"].parse().unwrap();
    let west: f64 = params["west"].parse().unwrap();
    Json(json!({
        "bounds": params,
        "points": [
            {"latitude": south + 0.1, "longitude": west + 0.1, "pm25": 5.0, "aqi": 20},
            {"latitude": south + 0.2, "longitude": west + 0.2, "pm25": 300.0, "aqi": 350},
            {"latitude": south - 5.0, "longitude": west, "pm25": 50.0, "aqi": 137}
        ]
    }))
}

async fn stub_yearly(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "location": params.get("location"),
        "year": 2026,
        "predictions": [
            {"month": 1, "year": 2026, "date": "2026-01-15T00:00:00",
             "predictedAQI": 220, "predictedPM25": 143.0, "confidence": 0.9},
            {"month": 7, "year": 2026, "date": "2026-07-15T00:00:00",
             "predictedAQI": 60, "predictedPM25": 21.0, "confidence": 0.7}
        ]
    }))
}

async fn stub_forecast(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if params.get("location").map(String::as_str) == Some("Nowhere") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "model offline"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "location": params.get("location"),
            "latitude": 28.6,
            "longitude": 77.2,
            "forecast": [
                {"date": "2026-03-02T00:00:00", "predictedAQI": 150, "predictedPM25": 55.0,
                 "confidence": 0.99}
            ]
        })),
    )
}
