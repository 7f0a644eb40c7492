//! Historical pollution series and their aggregates

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::air_quality::{classify_aqi, AqiLevel};

/// One day of a location's history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryPoint {
    pub date: DateTime<Utc>,
    pub pm25: f64,
    pub aqi: i64,
}

/// Aggregates over a history series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub days: usize,
    pub mean_aqi: f64,
    pub min_aqi: i64,
    pub max_aqi: i64,
    pub mean_pm25: f64,
    pub days_by_level: BTreeMap<AqiLevel, usize>,
    /// Last AQI minus first AQI in date order
    pub trend: i64,
    pub worst_day: DateTime<Utc>,
}

/// Summarize a history series; `None` when it is empty
pub fn summarize_history(points: &[HistoryPoint]) -> Option<HistorySummary> {
    let mut ordered: Vec<&HistoryPoint> = points.iter().collect();
    ordered.sort_by_key(|p| p.date);

    let first = *ordered.first()?;
    let last = *ordered.last()?;
    let worst = ordered.iter().copied().max_by_key(|p| p.aqi)?;

    let days = ordered.len();
    let mut days_by_level = BTreeMap::new();
    for point in &ordered {
        *days_by_level.entry(classify_aqi(point.aqi).level).or_insert(0) += 1;
    }

    Some(HistorySummary {
        days,
        mean_aqi: ordered.iter().map(|p| p.aqi as f64).sum::<f64>() / days as f64,
        min_aqi: ordered.iter().map(|p| p.aqi).min().unwrap_or(first.aqi),
        max_aqi: worst.aqi,
        mean_pm25: ordered.iter().map(|p| p.pm25).sum::<f64>() / days as f64,
        days_by_level,
        trend: last.aqi - first.aqi,
        worst_day: worst.date,
    })
}
