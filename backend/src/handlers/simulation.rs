//! HTTP handlers for tree simulations

use axum::{extract::State, Json};
use shared::simulation::Recommendation;

use crate::error::AppResult;
use crate::services::simulation::{SimulateInput, SimulationRecord};
use crate::services::SimulationService;
use crate::AppState;

/// Run a tree simulation over a selected area
pub async fn run_simulation(
    State(state): State<AppState>,
    Json(input): Json<SimulateInput>,
) -> AppResult<Json<SimulationRecord>> {
    let service = SimulationService::new(state.config.simulation.cost_model());
    let record = service.run(input)?;
    Ok(Json(record))
}

/// Planting, cost and timeline recommendations for a selected area
pub async fn get_recommendations(
    State(state): State<AppState>,
    Json(input): Json<SimulateInput>,
) -> AppResult<Json<Recommendation>> {
    let service = SimulationService::new(state.config.simulation.cost_model());
    let recommendation = service.recommendations(input)?;
    Ok(Json(recommendation))
}
