//! Air quality arithmetic
//!
//! Pure conversions from pollutant concentrations to the Air Quality Index,
//! its category band, the composite pollution index and the bio-urban tree
//! estimate used by the simulation screens. Every function here is total over
//! `f64` input, holds no state and performs no I/O.

use serde::{Deserialize, Serialize};

use crate::models::{pollutant_gauges, PollutantGauge, PollutantReading};
use crate::validation::{ensure_concentration, ValidationError};

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Pollution units a single bio-urban tree offsets
pub const TREE_YIELD_UNITS: f64 = 100.0;

/// One linear segment of the PM2.5 breakpoint table
///
/// Inside the segment the index is `((pm25 - origin) / span) * aqi_span + aqi_base`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AqiBreakpoint {
    /// Inclusive upper concentration bound (μg/m³)
    pub upper_pm25: f64,
    pub origin_pm25: f64,
    pub span_pm25: f64,
    pub aqi_span: f64,
    pub aqi_base: f64,
}

impl AqiBreakpoint {
    const fn new(upper_pm25: f64, origin_pm25: f64, span_pm25: f64, aqi_span: f64, aqi_base: f64) -> Self {
        Self {
            upper_pm25,
            origin_pm25,
            span_pm25,
            aqi_span,
            aqi_base,
        }
    }

    /// Unrounded index for a concentration on this segment's line
    pub fn evaluate(&self, pm25: f64) -> f64 {
        ((pm25 - self.origin_pm25) / self.span_pm25) * self.aqi_span + self.aqi_base
    }
}

/// PM2.5 breakpoints, ordered by upper bound
pub const PM25_BREAKPOINTS: [AqiBreakpoint; 6] = [
    AqiBreakpoint::new(12.0, 0.0, 1.0, 4.17, 0.0),
    AqiBreakpoint::new(35.4, 12.1, 23.3, 49.0, 51.0),
    AqiBreakpoint::new(55.4, 35.5, 19.9, 49.0, 101.0),
    AqiBreakpoint::new(150.4, 55.5, 94.9, 99.0, 151.0),
    AqiBreakpoint::new(250.4, 150.5, 99.9, 99.0, 201.0),
    AqiBreakpoint::new(f64::INFINITY, 250.5, 99.9, 99.0, 301.0),
];

/// Compute the AQI for a PM2.5 concentration (μg/m³)
///
/// Rounds half away from zero. Concentrations above the table extrapolate on
/// the last segment. A segment never reports less than the value the previous
/// segment reached at its upper bound, which keeps the index non-decreasing
/// across the 150.4 boundary where the table's lines overlap. Concentrations
/// from 150.4 up to about 200 therefore all report 250.
///
/// Negative input is not rejected and yields a negative index; use
/// [`try_compute_aqi`] when the caller has not validated the value.
pub fn compute_aqi(pm25: f64) -> i64 {
    let mut floor = f64::NEG_INFINITY;
    for segment in &PM25_BREAKPOINTS {
        if pm25 <= segment.upper_pm25 {
            return segment.evaluate(pm25).max(floor).round() as i64;
        }
        floor = segment.evaluate(segment.upper_pm25);
    }
    // NaN compares false against every bound
    0
}

/// [`compute_aqi`] with a precondition check on the concentration
pub fn try_compute_aqi(pm25: f64) -> Result<i64, ValidationError> {
    ensure_concentration("pm25", pm25)?;
    Ok(compute_aqi(pm25))
}

/// AQI health band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AqiLevel {
    /// 0-50
    Good,
    /// 51-100
    Moderate,
    /// 101-150
    UnhealthySensitive,
    /// 151-200
    Unhealthy,
    /// 201-300
    VeryUnhealthy,
    /// 301+
    Hazardous,
}

impl AqiLevel {
    pub const ALL: [AqiLevel; 6] = [
        AqiLevel::Good,
        AqiLevel::Moderate,
        AqiLevel::UnhealthySensitive,
        AqiLevel::Unhealthy,
        AqiLevel::VeryUnhealthy,
        AqiLevel::Hazardous,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            AqiLevel::Unhealthy => "Unhealthy",
            AqiLevel::VeryUnhealthy => "Very Unhealthy",
            AqiLevel::Hazardous => "Hazardous",
        }
    }

    /// Stylesheet token for text rendered in this band
    pub fn color_token(&self) -> &'static str {
        match self {
            AqiLevel::Good => "text-pollution-good",
            AqiLevel::Moderate => "text-pollution-moderate",
            AqiLevel::UnhealthySensitive => "text-pollution-unhealthy",
            AqiLevel::Unhealthy => "text-pollution-veryUnhealthy",
            AqiLevel::VeryUnhealthy => "text-red-600",
            AqiLevel::Hazardous => "text-pollution-hazardous",
        }
    }

    /// Hex fill for map markers and circles
    pub fn marker_color(&self) -> &'static str {
        match self {
            AqiLevel::Good => "#22c55e",
            AqiLevel::Moderate => "#facc15",
            AqiLevel::UnhealthySensitive => "#f97316",
            AqiLevel::Unhealthy => "#ef4444",
            AqiLevel::VeryUnhealthy => "#a855f7",
            AqiLevel::Hazardous => "#7f1d1d",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Air quality is satisfactory",
            AqiLevel::Moderate => "Acceptable for most people",
            AqiLevel::UnhealthySensitive => "Sensitive groups should limit outdoor activities",
            AqiLevel::Unhealthy => "Everyone may experience health effects",
            AqiLevel::VeryUnhealthy => "Health alert: everyone may experience serious effects",
            AqiLevel::Hazardous => "Health warning of emergency conditions",
        }
    }
}

impl std::fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Display data for an AQI band
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AqiCategory {
    pub level: AqiLevel,
    pub color_token: String,
    pub description: String,
}

impl From<AqiLevel> for AqiCategory {
    fn from(level: AqiLevel) -> Self {
        Self {
            level,
            color_token: level.color_token().to_string(),
            description: level.description().to_string(),
        }
    }
}

/// Classify an AQI value into its band (upper bounds are inclusive)
pub fn classify_aqi(aqi: i64) -> AqiCategory {
    let level = match aqi {
        i64::MIN..=50 => AqiLevel::Good,
        51..=100 => AqiLevel::Moderate,
        101..=150 => AqiLevel::UnhealthySensitive,
        151..=200 => AqiLevel::Unhealthy,
        201..=300 => AqiLevel::VeryUnhealthy,
        _ => AqiLevel::Hazardous,
    };
    AqiCategory::from(level)
}

/// Composite pollution index, clamped at zero
///
/// `0.3 × temperature + 0.4 × pm25 + 1.2 × co − 0.8 × altitude`
pub fn compute_pollution_index(temperature: f64, pm25: f64, co: f64, altitude: f64) -> f64 {
    let raw = 0.3 * temperature + 0.4 * pm25 + 1.2 * co - 0.8 * altitude;
    raw.max(0.0)
}

/// Bio-urban trees needed to offset `pollution_index` over `area_km2`
///
/// Never recommends fewer than one tree.
pub fn estimate_trees_needed(pollution_index: f64, area_km2: f64) -> u64 {
    let trees = (pollution_index * area_km2 / TREE_YIELD_UNITS).ceil();
    // `as` saturates, so NaN and negative products land on 0 before the floor
    (trees as u64).max(1)
}

/// Approximate area in km² of a latitude/longitude box
///
/// Flat projection scaled by the cosine of the mean latitude. Only meaningful
/// for small boxes away from the poles.
pub fn area_from_bounding_box(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> f64 {
    let lat_span = (max_lat - min_lat).abs().to_radians();
    let lon_span = (max_lon - min_lon).abs().to_radians();
    let mean_lat = ((min_lat + max_lat) / 2.0).to_radians();
    EARTH_RADIUS_KM * EARTH_RADIUS_KM * lat_span * lon_span * mean_lat.cos()
}

/// Everything the insight screens derive from one reading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityAssessment {
    pub aqi: i64,
    pub category: AqiCategory,
    pub pollution_index: f64,
    pub gauges: Vec<PollutantGauge>,
}

/// Assess a reading taken at `altitude` metres
pub fn assess_reading(reading: &PollutantReading, altitude: f64) -> AirQualityAssessment {
    let aqi = compute_aqi(reading.pm25);
    AirQualityAssessment {
        aqi,
        category: classify_aqi(aqi),
        pollution_index: compute_pollution_index(
            reading.temperature,
            reading.pm25,
            reading.co,
            altitude,
        ),
        gauges: pollutant_gauges(reading),
    }
}
