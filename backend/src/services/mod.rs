//! Business logic services for the Veridian gateway

pub mod air_quality;
pub mod simulation;

pub use air_quality::AirQualityService;
pub use simulation::SimulationService;
