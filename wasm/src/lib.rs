//! WebAssembly module for the Veridian air quality platform
//!
//! Provides client-side computation for:
//! - AQI calculation and category lookup
//! - Pollution index and bio-urban tree estimates
//! - Tree simulations and recommendations
//! - Account form validation
//! - Session persistence over `localStorage`

use serde::Serialize;
use shared::session::Session;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::simulation::*;
pub use shared::types::*;
pub use shared::validation::*;
pub use shared::{
    area_from_bounding_box, assess_reading, classify_aqi, compute_aqi, compute_pollution_index,
    estimate_trees_needed, AqiCategory, AqiLevel,
};

mod storage;

pub use storage::LocalStorageStore;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("veridian-wasm ready"));
}

fn to_js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

// ============================================================================
// Air Quality
// ============================================================================

/// Calculate the AQI from a PM2.5 concentration
#[wasm_bindgen]
pub fn calculate_aqi(pm25: f64) -> f64 {
    compute_aqi(pm25) as f64
}

/// Category JSON (`level`, `colorToken`, `description`) for an AQI value
#[wasm_bindgen]
pub fn aqi_category(aqi: f64) -> String {
    let category = classify_aqi(aqi.round() as i64);
    to_json(&category).unwrap_or_default()
}

/// Display label for an AQI value
#[wasm_bindgen]
pub fn aqi_label(aqi: f64) -> String {
    classify_aqi(aqi.round() as i64).level.label().to_string()
}

/// Marker hex color for an AQI value
#[wasm_bindgen]
pub fn aqi_marker_color(aqi: f64) -> String {
    classify_aqi(aqi.round() as i64)
        .level
        .marker_color()
        .to_string()
}

/// Calculate the composite pollution index
#[wasm_bindgen]
pub fn calculate_pollution_index(temperature: f64, pm25: f64, co: f64, altitude: f64) -> f64 {
    compute_pollution_index(temperature, pm25, co, altitude)
}

/// Calculate the number of bio-urban trees needed
#[wasm_bindgen]
pub fn calculate_bio_urban_trees(pollution_index: f64, area_km2: f64) -> f64 {
    estimate_trees_needed(pollution_index, area_km2) as f64
}

/// Calculate the area in km² of a selected map rectangle
#[wasm_bindgen]
pub fn calculate_area_km2(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> f64 {
    area_from_bounding_box(min_lat, max_lat, min_lon, max_lon)
}

fn assess_reading_inner(reading_json: &str, altitude: f64) -> Result<String, String> {
    let reading: PollutantReading = serde_json::from_str(reading_json)
        .map_err(|e| format!("Invalid reading JSON: {}", e))?;
    validate_reading(&reading).map_err(|e| e.to_string())?;
    to_json(&assess_reading(&reading, altitude))
}

/// Assess a reading: AQI, category, pollution index and gauges
#[wasm_bindgen]
pub fn assess_reading_json(reading_json: &str, altitude: f64) -> Result<String, JsValue> {
    assess_reading_inner(reading_json, altitude).map_err(to_js_error)
}

fn summarize_history_inner(points_json: &str) -> Result<String, String> {
    let points: Vec<HistoryPoint> = serde_json::from_str(points_json)
        .map_err(|e| format!("Invalid history JSON: {}", e))?;
    to_json(&summarize_history(&points))
}

/// Summarize a history series (`null` when empty)
#[wasm_bindgen]
pub fn summarize_history_json(points_json: &str) -> Result<String, JsValue> {
    summarize_history_inner(points_json).map_err(to_js_error)
}

fn map_markers_inner(points_json: &str) -> Result<String, String> {
    let points: Vec<MapPoint> = serde_json::from_str(points_json)
        .map_err(|e| format!("Invalid map points JSON: {}", e))?;
    let markers: Vec<MapMarker> = points.iter().map(MapMarker::from_point).collect();
    to_json(&markers)
}

/// Color-coded markers for map points
#[wasm_bindgen]
pub fn map_markers_json(points_json: &str) -> Result<String, JsValue> {
    map_markers_inner(points_json).map_err(to_js_error)
}

// ============================================================================
// Simulation
// ============================================================================

fn simulate_inner(request_json: &str) -> Result<String, String> {
    let request: SimulationRequest = serde_json::from_str(request_json)
        .map_err(|e| format!("Invalid simulation JSON: {}", e))?;
    validate_simulation_request(&request).map_err(|e| e.to_string())?;
    to_json(&simulate(&request))
}

/// Run a tree simulation
#[wasm_bindgen]
pub fn run_simulation(request_json: &str) -> Result<String, JsValue> {
    simulate_inner(request_json).map_err(to_js_error)
}

fn recommend_inner(result_json: &str) -> Result<String, String> {
    let result: SimulationResult = serde_json::from_str(result_json)
        .map_err(|e| format!("Invalid simulation result JSON: {}", e))?;
    to_json(&recommend(&result, &CostModel::default()))
}

/// Recommendations for a simulation result
#[wasm_bindgen]
pub fn recommend_json(result_json: &str) -> Result<String, JsValue> {
    recommend_inner(result_json).map_err(to_js_error)
}

// ============================================================================
// Account Forms
// ============================================================================

fn sign_up_errors_inner(form_json: &str) -> Result<String, String> {
    let form: SignUpForm =
        serde_json::from_str(form_json).map_err(|e| format!("Invalid form JSON: {}", e))?;
    let errors = validate_sign_up(&form).err().unwrap_or_default();
    to_json(&errors)
}

/// Field errors for the sign-up form (`{}` when valid)
#[wasm_bindgen]
pub fn validate_sign_up_form(form_json: &str) -> Result<String, JsValue> {
    sign_up_errors_inner(form_json).map_err(to_js_error)
}

fn sign_in_errors_inner(form_json: &str) -> Result<String, String> {
    let form: SignInForm =
        serde_json::from_str(form_json).map_err(|e| format!("Invalid form JSON: {}", e))?;
    let errors = validate_sign_in(&form).err().unwrap_or_default();
    to_json(&errors)
}

/// Field errors for the sign-in form (`{}` when valid)
#[wasm_bindgen]
pub fn validate_sign_in_form(form_json: &str) -> Result<String, JsValue> {
    sign_in_errors_inner(form_json).map_err(to_js_error)
}

// ============================================================================
// Session
// ============================================================================

fn open_session() -> Result<Session<LocalStorageStore>, JsValue> {
    let store = LocalStorageStore::open().map_err(|e| to_js_error(e.to_string()))?;
    Ok(Session::new(store))
}

/// Store the token and user from a sign-in or sign-up response
#[wasm_bindgen]
pub fn store_auth(token_json: &str) -> Result<(), JsValue> {
    let token: AuthToken = serde_json::from_str(token_json)
        .map_err(|e| to_js_error(format!("Invalid token JSON: {}", e)))?;
    open_session()?
        .sign_in(&token)
        .map_err(|e| to_js_error(e.to_string()))
}

#[wasm_bindgen]
pub fn is_signed_in() -> Result<bool, JsValue> {
    open_session()?
        .is_signed_in()
        .map_err(|e| to_js_error(e.to_string()))
}

/// Forget the token and user
#[wasm_bindgen]
pub fn sign_out() -> Result<(), JsValue> {
    open_session()?
        .sign_out()
        .map_err(|e| to_js_error(e.to_string()))
}

/// Stored preferences as JSON, defaults when none are saved
#[wasm_bindgen]
pub fn load_preferences() -> Result<String, JsValue> {
    let preferences = open_session()?
        .preferences()
        .map_err(|e| to_js_error(e.to_string()))?;
    to_json(&preferences).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn save_preferences(preferences_json: &str) -> Result<(), JsValue> {
    let preferences: Preferences = serde_json::from_str(preferences_json)
        .map_err(|e| to_js_error(format!("Invalid preferences JSON: {}", e)))?;
    open_session()?
        .save_preferences(&preferences)
        .map_err(|e| to_js_error(e.to_string()))
}

/// Mark the stored user as a verified researcher, returning the updated user
#[wasm_bindgen]
pub fn mark_researcher(application_json: &str) -> Result<String, JsValue> {
    let application: ResearcherApplication = serde_json::from_str(application_json)
        .map_err(|e| to_js_error(format!("Invalid application JSON: {}", e)))?;
    validate_researcher_application(&application).map_err(|e| to_js_error(e.to_string()))?;
    let user = open_session()?
        .mark_researcher(&application.institution)
        .map_err(|e| to_js_error(e.to_string()))?;
    to_json(&user).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_aqi() {
        assert_eq!(calculate_aqi(12.0), 50.0);
        assert_eq!(calculate_aqi(35.4), 100.0);
        assert_eq!(calculate_aqi(85.0), 182.0);
    }

    #[test]
    fn test_aqi_labels_and_colors() {
        assert_eq!(aqi_label(50.0), "Good");
        assert_eq!(aqi_label(51.0), "Moderate");
        assert_eq!(aqi_label(301.0), "Hazardous");
        assert_eq!(aqi_marker_color(120.0), "#f97316");
    }

    #[test]
    fn test_aqi_category_json() {
        let json: serde_json::Value = serde_json::from_str(&aqi_category(181.0)).unwrap();
        assert_eq!(json["level"], "unhealthy");
        assert_eq!(json["colorToken"], "text-pollution-veryUnhealthy");
    }

    #[test]
    fn test_pollution_index_and_trees() {
        let index = calculate_pollution_index(28.0, 85.0, 850.0, 200.0);
        assert!((index - 902.4).abs() < 1e-9);
        assert_eq!(calculate_bio_urban_trees(index, 2.0), 19.0);
        assert_eq!(calculate_bio_urban_trees(0.0, 5.0), 1.0);
    }

    #[test]
    fn test_area_is_symmetric() {
        let forward = calculate_area_km2(28.5, 28.7, 77.1, 77.3);
        let backward = calculate_area_km2(28.7, 28.5, 77.3, 77.1);
        assert_eq!(forward, backward);
        assert!(forward > 0.0);
    }

    #[test]
    fn test_assess_reading_rejects_negative() {
        let json = r#"{"pm25": -3, "pm10": 0, "no2": 0, "o3": 0, "co": 0,
                       "temperature": 20, "humidity": 50}"#;
        let err = assess_reading_inner(json, 0.0).unwrap_err();
        assert!(err.contains("pm25"));
    }

    #[test]
    fn test_assess_reading_json() {
        let json = r#"{"pm25": 85, "pm10": 120, "no2": 45, "o3": 30, "co": 850,
                       "temperature": 28, "humidity": 55}"#;
        let out: serde_json::Value =
            serde_json::from_str(&assess_reading_inner(json, 200.0).unwrap()).unwrap();
        assert_eq!(out["aqi"], 182);
        assert_eq!(out["gauges"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_simulation_round_trip_to_recommendation() {
        let request = r#"{
            "location": "Selected Area",
            "bounds": {"minLat": 28.60, "maxLat": 28.62, "minLon": 77.20, "maxLon": 77.22},
            "reading": {"pm25": 85, "pm10": 120, "no2": 45, "o3": 30, "co": 850,
                        "temperature": 28, "humidity": 55},
            "altitude": 200
        }"#;
        let result = simulate_inner(request).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["treesNeeded"], 40);
        assert_eq!(parsed["currentAQI"], 182);

        let rec: serde_json::Value =
            serde_json::from_str(&recommend_inner(&result).unwrap()).unwrap();
        assert_eq!(rec["treesRecommended"], 40);
        assert_eq!(rec["installationDays"], 4);
    }

    #[test]
    fn test_simulation_rejects_oversized_area() {
        let request = r#"{
            "location": "Everywhere",
            "bounds": {"minLat": -5, "maxLat": 5, "minLon": 0, "maxLon": 10},
            "reading": {"pm25": 85, "pm10": 120, "no2": 45, "o3": 30, "co": 1000000,
                        "temperature": 28, "humidity": 55}
        }"#;
        let err = simulate_inner(request).unwrap_err();
        assert!(err.contains("bounds"), "{}", err);
    }

    #[test]
    fn test_sign_up_form_errors() {
        let json = r#"{"name": "", "email": "bad", "password": "short", "confirmPassword": "x"}"#;
        let errors: serde_json::Value =
            serde_json::from_str(&sign_up_errors_inner(json).unwrap()).unwrap();
        assert_eq!(errors["name"], "Name is required");
        assert_eq!(errors["email"], "Invalid email format");
        assert_eq!(errors["confirmPassword"], "Passwords do not match");

        let ok = r#"{"name": "Asha", "email": "asha@example.com",
                     "password": "longenough", "confirmPassword": "longenough"}"#;
        assert_eq!(sign_up_errors_inner(ok).unwrap(), "{}");
    }

    #[test]
    fn test_sign_in_form_errors() {
        let errors: serde_json::Value =
            serde_json::from_str(&sign_in_errors_inner(r#"{"email": "", "password": ""}"#).unwrap())
                .unwrap();
        assert_eq!(errors["email"], "Email is required");
        assert_eq!(errors["password"], "Password is required");
    }

    #[test]
    fn test_map_markers() {
        let json = r#"[{"latitude": 28.6, "longitude": 77.2, "pm25": 5.0}]"#;
        let markers: serde_json::Value =
            serde_json::from_str(&map_markers_inner(json).unwrap()).unwrap();
        assert_eq!(markers[0]["color"], "#22c55e");
        assert_eq!(markers[0]["label"], "Good");
    }

    #[test]
    fn test_history_summary_json() {
        assert_eq!(summarize_history_inner("[]").unwrap(), "null");
        let json = r#"[{"date": "2026-01-01T00:00:00Z", "pm25": 10.0, "aqi": 42}]"#;
        let summary: serde_json::Value =
            serde_json::from_str(&summarize_history_inner(json).unwrap()).unwrap();
        assert_eq!(summary["days"], 1);
    }
}
