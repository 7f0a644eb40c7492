//! HTTP handlers for the Veridian gateway

pub mod air_quality;
pub mod health;
pub mod pollution;
pub mod prediction;
pub mod simulation;

pub use air_quality::{area, assess, classify, get_aqi};
pub use health::health_check;
pub use pollution::{get_current, get_history, get_map};
pub use prediction::{get_forecast, get_yearly};
pub use simulation::{get_recommendations, run_simulation};
