//! HTTP handlers for the air quality calculators
//!
//! These run entirely in the gateway and never call the Backend Data API.

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};
use shared::{
    classify_aqi, validate_coordinates, AirQualityAssessment, AqiCategory, BoundingBox,
    GpsCoordinates, PollutantReading,
};

use crate::error::AppResult;
use crate::services::air_quality::{self, AqiReport};

#[derive(Debug, Deserialize)]
pub struct AqiQuery {
    pub pm25: f64,
}

/// AQI and category for a PM2.5 concentration
pub async fn get_aqi(Query(query): Query<AqiQuery>) -> AppResult<Json<AqiReport>> {
    let report = air_quality::aqi_report(query.pm25)?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub aqi: i64,
}

/// Category for an AQI value
pub async fn classify(Query(query): Query<ClassifyQuery>) -> Json<AqiCategory> {
    Json(classify_aqi(query.aqi))
}

#[derive(Debug, Deserialize)]
pub struct AssessInput {
    pub reading: PollutantReading,
    /// Metres above sea level
    #[serde(default)]
    pub altitude: f64,
}

/// Assess a full reading
pub async fn assess(Json(input): Json<AssessInput>) -> AppResult<Json<AirQualityAssessment>> {
    let assessment = air_quality::assess(&input.reading, input.altitude)?;
    Ok(Json(assessment))
}

#[derive(Debug, Deserialize)]
pub struct AreaQuery {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

#[derive(Debug, Serialize)]
pub struct AreaResponse {
    pub area_km2: f64,
    pub bounds: BoundingBox,
}

/// Area of a map selection
pub async fn area(Query(query): Query<AreaQuery>) -> AppResult<Json<AreaResponse>> {
    let a = GpsCoordinates::new(query.min_lat, query.min_lon);
    let b = GpsCoordinates::new(query.max_lat, query.max_lon);
    validate_coordinates(&a)?;
    validate_coordinates(&b)?;

    let bounds = BoundingBox::from_corners(a, b);
    Ok(Json(AreaResponse {
        area_km2: bounds.area_km2(),
        bounds,
    }))
}
