//! Prediction models
//!
//! Predictions are produced by the upstream model service; these records only
//! carry them to the screens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::air_quality::{classify_aqi, AqiCategory};

/// A predicted AQI for one date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionPoint {
    pub date: DateTime<Utc>,
    #[serde(rename = "predictedAQI")]
    pub predicted_aqi: i64,
    #[serde(rename = "predictedPM25")]
    pub predicted_pm25: f64,
    /// Model confidence in [0, 1]
    pub confidence: f64,
}

impl PredictionPoint {
    pub fn category(&self) -> AqiCategory {
        classify_aqi(self.predicted_aqi)
    }
}

/// Mid-month prediction in a yearly series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyPrediction {
    pub month: u32,
    pub year: i32,
    #[serde(flatten)]
    pub point: PredictionPoint,
}

/// Monthly predictions for a location and year
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearlyPrediction {
    pub location: String,
    pub year: i32,
    pub predictions: Vec<MonthlyPrediction>,
}

impl YearlyPrediction {
    /// Month with the highest predicted AQI
    pub fn peak_month(&self) -> Option<&MonthlyPrediction> {
        self.predictions.iter().max_by_key(|p| p.point.predicted_aqi)
    }

    pub fn mean_confidence(&self) -> Option<f64> {
        if self.predictions.is_empty() {
            return None;
        }
        let total: f64 = self.predictions.iter().map(|p| p.point.confidence).sum();
        Some(total / self.predictions.len() as f64)
    }
}

/// Day-by-day forecast for a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Forecast {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub forecast: Vec<PredictionPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::air_quality::AqiLevel;

    #[test]
    fn test_yearly_wire_shape() {
        let json = r#"{
            "location": "New Delhi",
            "year": 2026,
            "predictions": [
                {"month": 1, "year": 2026, "date": "2026-01-15T00:00:00Z",
                 "predictedAQI": 240, "predictedPM25": 156.0, "confidence": 0.9},
                {"month": 7, "year": 2026, "date": "2026-07-15T00:00:00Z",
                 "predictedAQI": 80, "predictedPM25": 28.0, "confidence": 0.7}
            ]
        }"#;
        let yearly: YearlyPrediction = serde_json::from_str(json).unwrap();

        assert_eq!(yearly.predictions.len(), 2);
        let peak = yearly.peak_month().unwrap();
        assert_eq!(peak.month, 1);
        assert_eq!(peak.point.category().level, AqiLevel::VeryUnhealthy);
        assert!((yearly.mean_confidence().unwrap() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_empty_year_has_no_peak() {
        let yearly = YearlyPrediction {
            location: "Nowhere".to_string(),
            year: 2026,
            predictions: vec![],
        };
        assert!(yearly.peak_month().is_none());
        assert!(yearly.mean_confidence().is_none());
    }
}
