//! Tree simulation service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::simulation::{
    recommend, simulate, validate_simulation_request, CostModel, Recommendation,
    SimulationResult, MAX_SIMULATION_AREA_KM2,
};
use shared::{BoundingBox, PollutantReading, SimulationRequest};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;

/// Simulation service
#[derive(Clone)]
pub struct SimulationService {
    costs: CostModel,
}

/// Simulation request body
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SimulateInput {
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    #[validate(custom = "validate_bounds_area")]
    pub bounds: BoundingBox,

    pub reading: PollutantReading,

    #[serde(default)]
    pub altitude: f64,
}

fn validate_bounds_area(bounds: &BoundingBox) -> Result<(), validator::ValidationError> {
    let area = bounds.area_km2();
    let message = if !area.is_finite() || area <= 0.0 {
        "Area must be positive"
    } else if area > MAX_SIMULATION_AREA_KM2 {
        "Area must be at most 10000 km²"
    } else {
        return Ok(());
    };
    let mut err = validator::ValidationError::new("area");
    err.message = Some(message.into());
    Err(err)
}

impl From<SimulateInput> for SimulationRequest {
    fn from(input: SimulateInput) -> Self {
        SimulationRequest {
            location: input.location,
            bounds: input.bounds,
            reading: input.reading,
            altitude: input.altitude,
        }
    }
}

/// A completed simulation run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: SimulationResult,
}

impl SimulationService {
    pub fn new(costs: CostModel) -> Self {
        Self { costs }
    }

    /// Validate the input and run the simulation
    pub fn run(&self, input: SimulateInput) -> AppResult<SimulationRecord> {
        input.validate()?;
        let request = SimulationRequest::from(input);
        validate_simulation_request(&request)?;

        let result = simulate(&request);
        tracing::info!(
            "Simulation for {}: {} trees over {:.2} km², AQI {} -> {}",
            result.location,
            result.trees_needed,
            result.area_km2,
            result.current_aqi,
            result.projected_aqi
        );

        Ok(SimulationRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            result,
        })
    }

    /// Run the simulation and price it
    pub fn recommendations(&self, input: SimulateInput) -> AppResult<Recommendation> {
        let record = self.run(input)?;
        let recommendation = recommend(&record.result, &self.costs);
        tracing::debug!(
            "Recommendation for {}: cost {}, {} installation days",
            recommendation.location,
            recommendation.estimated_cost,
            recommendation.installation_days
        );
        Ok(recommendation)
    }
}
