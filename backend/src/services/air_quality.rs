//! Air quality service
//!
//! Combines upstream readings with the shared air quality arithmetic.

use serde::Serialize;
use shared::{
    assess_reading, classify_aqi, summarize_history, try_compute_aqi, validate_reading,
    AirQualityAssessment, AqiCategory, BoundingBox, GpsCoordinates, HistoryPoint, HistorySummary,
    MapOverlay, MonthlyPrediction, PollutantReading, PollutionRecord, PredictionPoint,
};

use crate::error::AppResult;
use crate::external::pollution::{LocationQuery, PollutionApiClient};

/// Air quality service over the Backend Data API
#[derive(Clone)]
pub struct AirQualityService {
    client: PollutionApiClient,
}

/// AQI for a single concentration
#[derive(Debug, Clone, Serialize)]
pub struct AqiReport {
    pub pm25: f64,
    pub aqi: i64,
    pub category: AqiCategory,
}

/// Current reading with everything derived from it
#[derive(Debug, Clone, Serialize)]
pub struct CurrentReport {
    #[serde(flatten)]
    pub record: PollutionRecord,
    pub assessment: AirQualityAssessment,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryReport {
    pub location: String,
    pub days: u32,
    pub history: Vec<HistoryPoint>,
    /// `None` when the upstream series is empty
    pub summary: Option<HistorySummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorizedMonth {
    #[serde(flatten)]
    pub prediction: MonthlyPrediction,
    pub category: AqiCategory,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReport {
    pub location: String,
    pub year: i32,
    pub predictions: Vec<CategorizedMonth>,
    pub peak_month: Option<u32>,
    pub mean_confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorizedPoint {
    #[serde(flatten)]
    pub point: PredictionPoint,
    pub category: AqiCategory,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub forecast: Vec<CategorizedPoint>,
}

/// AQI and category for a concentration, rejecting invalid input
pub fn aqi_report(pm25: f64) -> AppResult<AqiReport> {
    let aqi = try_compute_aqi(pm25)?;
    Ok(AqiReport {
        pm25,
        aqi,
        category: classify_aqi(aqi),
    })
}

/// Validate and assess a reading
pub fn assess(reading: &PollutantReading, altitude: f64) -> AppResult<AirQualityAssessment> {
    validate_reading(reading)?;
    Ok(assess_reading(reading, altitude))
}

impl AirQualityService {
    pub fn new(client: PollutionApiClient) -> Self {
        Self { client }
    }

    /// Current reading for a location, assessed at `altitude` metres
    pub async fn current(&self, query: &LocationQuery, altitude: f64) -> AppResult<CurrentReport> {
        let record = self.client.current(query).await?;
        let assessment = assess_reading(&record.reading, altitude);
        tracing::debug!(
            "Current reading for {}: AQI {} ({})",
            record.location,
            assessment.aqi,
            assessment.category.level
        );
        Ok(CurrentReport { record, assessment })
    }

    pub async fn history(&self, location: &str, days: u32) -> AppResult<HistoryReport> {
        let history = self.client.history(location, days).await?;
        let summary = summarize_history(&history);
        Ok(HistoryReport {
            location: location.to_string(),
            days,
            history,
            summary,
        })
    }

    /// Markers for the samples that fall inside `bounds`
    pub async fn map_overlay(&self, bounds: BoundingBox) -> AppResult<MapOverlay> {
        let points = self.client.map(&bounds).await?;
        let overlay = MapOverlay::build(bounds, &points);
        if overlay.markers.len() < points.len() {
            tracing::warn!(
                "Dropped {} map samples outside the requested bounds",
                points.len() - overlay.markers.len()
            );
        }
        Ok(overlay)
    }

    pub async fn yearly(
        &self,
        location: &str,
        coordinates: GpsCoordinates,
        year: i32,
    ) -> AppResult<YearlyReport> {
        let yearly = self.client.yearly(location, coordinates, year).await?;
        let peak_month = yearly.peak_month().map(|p| p.month);
        let mean_confidence = yearly.mean_confidence();

        Ok(YearlyReport {
            location: yearly.location,
            year: yearly.year,
            predictions: yearly
                .predictions
                .into_iter()
                .map(|prediction| CategorizedMonth {
                    category: prediction.point.category(),
                    prediction,
                })
                .collect(),
            peak_month,
            mean_confidence,
        })
    }

    pub async fn forecast(
        &self,
        location: &str,
        coordinates: GpsCoordinates,
        days: u32,
    ) -> AppResult<ForecastReport> {
        let forecast = self.client.forecast(location, coordinates, days).await?;
        Ok(ForecastReport {
            location: forecast.location,
            latitude: forecast.latitude,
            longitude: forecast.longitude,
            forecast: forecast
                .forecast
                .into_iter()
                .map(|point| CategorizedPoint {
                    category: point.category(),
                    point,
                })
                .collect(),
        })
    }
}
