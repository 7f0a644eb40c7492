//! HTTP handlers for pollution readings

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{
    validate_coordinates, BoundingBox, GpsCoordinates, MapOverlay, DEFAULT_CENTER,
    DEFAULT_MAP_DELTA_DEG,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::LocationQuery;
use crate::services::air_quality::{CurrentReport, HistoryReport};
use crate::services::AirQualityService;
use crate::AppState;

/// Either a place name or a coordinate pair
#[derive(Debug, Deserialize)]
pub struct CurrentQuery {
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
}

impl CurrentQuery {
    fn location_query(&self) -> AppResult<LocationQuery> {
        if let Some(location) = self.location.as_deref().map(str::trim) {
            if !location.is_empty() {
                return Ok(LocationQuery::Named(location.to_string()));
            }
        }
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => {
                let coordinates = GpsCoordinates::new(latitude, longitude);
                validate_coordinates(&coordinates)?;
                Ok(LocationQuery::Coordinates(coordinates))
            }
            _ => Err(AppError::validation(
                "location",
                "Either location or latitude/longitude must be provided",
            )),
        }
    }
}

/// Current reading and its assessment
pub async fn get_current(
    State(state): State<AppState>,
    Query(query): Query<CurrentQuery>,
) -> AppResult<Json<CurrentReport>> {
    let location = query.location_query()?;
    let service = AirQualityService::new(state.pollution_client);
    let report = service
        .current(&location, query.altitude.unwrap_or(0.0))
        .await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize, Validate)]
pub struct HistoryQuery {
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    #[serde(default = "default_history_days")]
    #[validate(range(min = 1, max = 365, message = "Days must be between 1 and 365"))]
    pub days: u32,
}

fn default_history_days() -> u32 {
    7
}

/// History series with its summary
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<HistoryReport>> {
    query.validate()?;
    let service = AirQualityService::new(state.pollution_client);
    let report = service.history(&query.location, query.days).await?;
    Ok(Json(report))
}

/// Map window edges; all absent means the default window
#[derive(Debug, Deserialize)]
pub struct MapQuery {
    pub north: Option<f64>,
    pub south: Option<f64>,
    pub east: Option<f64>,
    pub west: Option<f64>,
}

impl MapQuery {
    fn bounds(&self) -> AppResult<BoundingBox> {
        match (self.north, self.south, self.east, self.west) {
            (None, None, None, None) => {
                Ok(BoundingBox::around(DEFAULT_CENTER, DEFAULT_MAP_DELTA_DEG))
            }
            (Some(north), Some(south), Some(east), Some(west)) => {
                let north_east = GpsCoordinates::new(north, east);
                let south_west = GpsCoordinates::new(south, west);
                validate_coordinates(&north_east)?;
                validate_coordinates(&south_west)?;
                Ok(BoundingBox::from_corners(south_west, north_east))
            }
            _ => Err(AppError::validation(
                "bounds",
                "north, south, east and west must be given together",
            )),
        }
    }
}

/// Color-coded markers for a map window
pub async fn get_map(
    State(state): State<AppState>,
    Query(query): Query<MapQuery>,
) -> AppResult<Json<MapOverlay>> {
    let bounds = query.bounds()?;
    let service = AirQualityService::new(state.pollution_client);
    let overlay = service.map_overlay(bounds).await?;
    Ok(Json(overlay))
}
