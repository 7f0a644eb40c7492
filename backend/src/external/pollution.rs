//! Backend Data API client
//!
//! Fetches readings, history, map samples and model predictions from the
//! pollution data service. Responses are read into loose private structs and
//! checked before they become shared records, so a bad upstream value is an
//! error here rather than a wrong AQI further down.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::{
    compute_aqi, ensure_concentration, BoundingBox, Forecast, GpsCoordinates, HistoryPoint,
    MapPoint, MonthlyPrediction, PollutantReading, PollutionRecord, PredictionPoint,
    YearlyPrediction,
};

use crate::error::{AppError, AppResult};

/// Backend Data API client
#[derive(Clone)]
pub struct PollutionApiClient {
    client: Client,
    base_url: String,
}

/// Where a current reading is wanted
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Named(String),
    Coordinates(GpsCoordinates),
}

#[derive(Debug, Deserialize)]
struct RawReading {
    location: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    date: Option<String>,
    pm25: Option<f64>,
    pm10: Option<f64>,
    no2: Option<f64>,
    o3: Option<f64>,
    co: Option<f64>,
    temperature: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawHistoryResponse {
    #[serde(default)]
    history: Vec<RawHistoryPoint>,
}

#[derive(Debug, Deserialize)]
struct RawHistoryPoint {
    date: String,
    pm25: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawMapResponse {
    #[serde(default)]
    points: Vec<RawMapPoint>,
}

#[derive(Debug, Deserialize)]
struct RawMapPoint {
    latitude: f64,
    longitude: f64,
    pm25: Option<f64>,
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    date: String,
    #[serde(rename = "predictedAQI")]
    predicted_aqi: Option<f64>,
    #[serde(rename = "predictedPM25")]
    predicted_pm25: Option<f64>,
    confidence: Option<f64>,
    month: Option<u32>,
    year: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct RawYearlyResponse {
    location: Option<String>,
    year: Option<i32>,
    #[serde(default)]
    predictions: Vec<RawPrediction>,
}

#[derive(Debug, Deserialize)]
struct RawForecastResponse {
    location: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    forecast: Vec<RawPrediction>,
}

impl PollutionApiClient {
    /// Create a client with a request timeout
    pub fn new(base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client with default settings against `base_url` (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current reading for a place name or coordinates
    pub async fn current(&self, query: &LocationQuery) -> AppResult<PollutionRecord> {
        let params = match query {
            LocationQuery::Named(location) => vec![("location", location.clone())],
            LocationQuery::Coordinates(c) => vec![
                ("latitude", c.latitude.to_string()),
                ("longitude", c.longitude.to_string()),
            ],
        };
        let raw: RawReading = self.get_json("/api/pollution/current", &params).await?;
        convert_reading(raw, query)
    }

    /// Daily history for the last `days` days
    pub async fn history(&self, location: &str, days: u32) -> AppResult<Vec<HistoryPoint>> {
        if !(1..=365).contains(&days) {
            return Err(AppError::validation("days", "must be between 1 and 365"));
        }
        let params = [
            ("location", location.to_string()),
            ("days", days.to_string()),
        ];
        let raw: RawHistoryResponse = self.get_json("/api/pollution/history", &params).await?;
        raw.history.into_iter().map(convert_history_point).collect()
    }

    /// Sampled concentrations inside a map window
    pub async fn map(&self, bounds: &BoundingBox) -> AppResult<Vec<MapPoint>> {
        let params = [
            ("north", bounds.north().to_string()),
            ("south", bounds.south().to_string()),
            ("east", bounds.east().to_string()),
            ("west", bounds.west().to_string()),
        ];
        let raw: RawMapResponse = self.get_json("/api/pollution/map", &params).await?;
        raw.points.into_iter().map(convert_map_point).collect()
    }

    /// Monthly predictions for a year
    pub async fn yearly(
        &self,
        location: &str,
        coordinates: GpsCoordinates,
        year: i32,
    ) -> AppResult<YearlyPrediction> {
        let params = [
            ("location", location.to_string()),
            ("latitude", coordinates.latitude.to_string()),
            ("longitude", coordinates.longitude.to_string()),
            ("year", year.to_string()),
        ];
        let raw: RawYearlyResponse = self.get_json("/api/prediction/yearly", &params).await?;
        convert_yearly(raw, location, year)
    }

    /// Day-by-day forecast
    pub async fn forecast(
        &self,
        location: &str,
        coordinates: GpsCoordinates,
        days: u32,
    ) -> AppResult<Forecast> {
        if !(1..=365).contains(&days) {
            return Err(AppError::validation("days", "must be between 1 and 365"));
        }
        let params = [
            ("location", location.to_string()),
            ("latitude", coordinates.latitude.to_string()),
            ("longitude", coordinates.longitude.to_string()),
            ("days", days.to_string()),
        ];
        let raw: RawForecastResponse = self.get_json("/api/prediction/forecast", &params).await?;
        convert_forecast(raw, location, coordinates)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::info!("Backend Data API request: {}", path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Backend Data API {} returned {}", path, status);
            return Err(AppError::UpstreamStatus { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("unreadable response from {}: {}", path, e)))
    }
}

fn concentration(field: &str, value: Option<f64>) -> AppResult<f64> {
    let value = value.unwrap_or(0.0);
    ensure_concentration(field, value).map_err(|e| AppError::Upstream(e.to_string()))?;
    Ok(value)
}

fn required_pm25(value: Option<f64>) -> AppResult<f64> {
    let pm25 = value.ok_or_else(|| AppError::Upstream("missing pm25".to_string()))?;
    concentration("pm25", Some(pm25))
}

/// Upstream timestamps are RFC 3339 or naive ISO 8601 in UTC
fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| AppError::Upstream(format!("unparseable date '{}'", value)))
}

fn convert_reading(raw: RawReading, query: &LocationQuery) -> AppResult<PollutionRecord> {
    let reading = PollutantReading {
        pm25: required_pm25(raw.pm25)?,
        pm10: concentration("pm10", raw.pm10)?,
        no2: concentration("no2", raw.no2)?,
        o3: concentration("o3", raw.o3)?,
        co: concentration("co", raw.co)?,
        temperature: raw.temperature.filter(|t| t.is_finite()).unwrap_or(0.0),
        humidity: concentration("humidity", raw.humidity)?,
    };

    let (fallback_location, fallback_coordinates) = match query {
        LocationQuery::Named(name) => (name.clone(), GpsCoordinates::default()),
        LocationQuery::Coordinates(c) => (String::new(), *c),
    };
    let coordinates = match (raw.latitude, raw.longitude) {
        (Some(latitude), Some(longitude)) => GpsCoordinates::new(latitude, longitude),
        _ => fallback_coordinates,
    };
    let timestamp = match raw.date.as_deref() {
        Some(date) => parse_timestamp(date)?,
        None => Utc::now(),
    };

    Ok(PollutionRecord {
        location: raw.location.unwrap_or(fallback_location),
        coordinates,
        timestamp,
        reading,
    })
}

/// The AQI is recomputed from pm25 so every screen uses one scale
fn convert_history_point(raw: RawHistoryPoint) -> AppResult<HistoryPoint> {
    let pm25 = required_pm25(raw.pm25)?;
    Ok(HistoryPoint {
        date: parse_timestamp(&raw.date)?,
        pm25,
        aqi: compute_aqi(pm25),
    })
}

fn convert_map_point(raw: RawMapPoint) -> AppResult<MapPoint> {
    Ok(MapPoint {
        position: GpsCoordinates::new(raw.latitude, raw.longitude),
        pm25: required_pm25(raw.pm25)?,
        location: raw.location,
    })
}

fn convert_prediction(raw: &RawPrediction) -> AppResult<PredictionPoint> {
    let predicted_aqi = raw
        .predicted_aqi
        .ok_or_else(|| AppError::Upstream("missing predictedAQI".to_string()))?;
    ensure_concentration("predictedAQI", predicted_aqi)
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(PredictionPoint {
        date: parse_timestamp(&raw.date)?,
        predicted_aqi: predicted_aqi.round() as i64,
        predicted_pm25: concentration("predictedPM25", raw.predicted_pm25)?,
        confidence: raw
            .confidence
            .filter(|c| c.is_finite())
            .unwrap_or(0.0)
            .clamp(0.0, 1.0),
    })
}

fn convert_yearly(raw: RawYearlyResponse, location: &str, year: i32) -> AppResult<YearlyPrediction> {
    let year = raw.year.unwrap_or(year);
    let predictions = raw
        .predictions
        .iter()
        .map(|p| {
            let point = convert_prediction(p)?;
            Ok(MonthlyPrediction {
                month: p.month.unwrap_or_else(|| chrono::Datelike::month(&point.date)),
                year: p.year.unwrap_or(year),
                point,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(YearlyPrediction {
        location: raw.location.unwrap_or_else(|| location.to_string()),
        year,
        predictions,
    })
}

fn convert_forecast(
    raw: RawForecastResponse,
    location: &str,
    coordinates: GpsCoordinates,
) -> AppResult<Forecast> {
    let forecast = raw
        .forecast
        .iter()
        .map(convert_prediction)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Forecast {
        location: raw.location.unwrap_or_else(|| location.to_string()),
        latitude: raw.latitude.unwrap_or(coordinates.latitude),
        longitude: raw.longitude.unwrap_or(coordinates.longitude),
        forecast,
    })
}
