//! Pollution reading models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// Measured concentrations at one point in time
///
/// Particulates and gases in μg/m³, temperature in °C, humidity in percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PollutantReading {
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub o3: f64,
    pub co: f64,
    pub temperature: f64,
    pub humidity: f64,
}

/// A reading tagged with where and when it was taken
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollutionRecord {
    pub location: String,
    #[serde(flatten)]
    pub coordinates: GpsCoordinates,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub reading: PollutantReading,
}

/// Pollutants shown as gauges on the insight screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Pollutant {
    Pm25,
    Pm10,
    No2,
    O3,
    Co,
}

impl Pollutant {
    pub const ALL: [Pollutant; 5] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::O3,
        Pollutant::Co,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::No2 => "NO₂",
            Pollutant::O3 => "O₃",
            Pollutant::Co => "CO",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "Fine particulate matter",
            Pollutant::Pm10 => "Coarse particulate matter",
            Pollutant::No2 => "Nitrogen dioxide",
            Pollutant::O3 => "Ground-level ozone",
            Pollutant::Co => "Carbon monoxide",
        }
    }

    pub fn unit(&self) -> &'static str {
        "μg/m³"
    }

    /// Display threshold above which the gauge turns red
    pub fn safe_limit(&self) -> f64 {
        match self {
            Pollutant::Pm25 => 60.0,
            Pollutant::Pm10 => 100.0,
            Pollutant::No2 => 80.0,
            Pollutant::O3 => 100.0,
            Pollutant::Co => 2000.0,
        }
    }

    pub fn value_in(&self, reading: &PollutantReading) -> f64 {
        match self {
            Pollutant::Pm25 => reading.pm25,
            Pollutant::Pm10 => reading.pm10,
            Pollutant::No2 => reading.no2,
            Pollutant::O3 => reading.o3,
            Pollutant::Co => reading.co,
        }
    }
}

/// One pollutant measured against its safe limit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollutantGauge {
    pub pollutant: Pollutant,
    pub value: f64,
    pub limit: f64,
    /// Share of the limit, capped at 100 for the bar width
    pub percent_of_limit: f64,
    pub exceeds_limit: bool,
}

impl PollutantGauge {
    pub fn measure(pollutant: Pollutant, reading: &PollutantReading) -> Self {
        let value = pollutant.value_in(reading);
        let limit = pollutant.safe_limit();
        Self {
            pollutant,
            value,
            limit,
            percent_of_limit: (value / limit * 100.0).min(100.0),
            exceeds_limit: value > limit,
        }
    }
}

/// Gauges for every displayed pollutant, in display order
pub fn pollutant_gauges(reading: &PollutantReading) -> Vec<PollutantGauge> {
    Pollutant::ALL
        .iter()
        .map(|p| PollutantGauge::measure(*p, reading))
        .collect()
}
