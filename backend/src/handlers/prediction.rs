//! HTTP handlers for model predictions

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{validate_coordinates, GpsCoordinates};
use validator::Validate;

use crate::error::AppResult;
use crate::services::air_quality::{ForecastReport, YearlyReport};
use crate::services::AirQualityService;
use crate::AppState;

/// Year the prediction model currently covers
pub const DEFAULT_PREDICTION_YEAR: i32 = 2026;

#[derive(Debug, Deserialize, Validate)]
pub struct YearlyQuery {
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_year")]
    pub year: i32,
}

fn default_year() -> i32 {
    DEFAULT_PREDICTION_YEAR
}

/// Monthly predictions with categories
pub async fn get_yearly(
    State(state): State<AppState>,
    Query(query): Query<YearlyQuery>,
) -> AppResult<Json<YearlyReport>> {
    query.validate()?;
    let coordinates = GpsCoordinates::new(query.latitude, query.longitude);
    validate_coordinates(&coordinates)?;

    let service = AirQualityService::new(state.pollution_client);
    let report = service
        .yearly(&query.location, coordinates, query.year)
        .await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForecastQuery {
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_forecast_days")]
    #[validate(range(min = 1, max = 365, message = "Days must be between 1 and 365"))]
    pub days: u32,
}

fn default_forecast_days() -> u32 {
    7
}

/// Day-by-day forecast with categories
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<ForecastReport>> {
    query.validate()?;
    let coordinates = GpsCoordinates::new(query.latitude, query.longitude);
    validate_coordinates(&coordinates)?;

    let service = AirQualityService::new(state.pollution_client);
    let report = service
        .forecast(&query.location, coordinates, query.days)
        .await?;
    Ok(Json(report))
}
