//! Route definitions for the Veridian gateway

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Calculators (no upstream calls)
        .nest("/air-quality", air_quality_routes())
        // Readings from the Backend Data API
        .nest("/pollution", pollution_routes())
        .nest("/prediction", prediction_routes())
        .nest("/simulation", simulation_routes())
}

fn air_quality_routes() -> Router<AppState> {
    Router::new()
        .route("/aqi", get(handlers::get_aqi))
        .route("/classify", get(handlers::classify))
        .route("/assess", post(handlers::assess))
        .route("/area", get(handlers::area))
}

fn pollution_routes() -> Router<AppState> {
    Router::new()
        .route("/current", get(handlers::get_current))
        .route("/history", get(handlers::get_history))
        .route("/map", get(handlers::get_map))
}

fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route("/yearly", get(handlers::get_yearly))
        .route("/forecast", get(handlers::get_forecast))
}

fn simulation_routes() -> Router<AppState> {
    Router::new()
        .route("/simulate", post(handlers::run_simulation))
        .route("/recommendations", post(handlers::get_recommendations))
}
