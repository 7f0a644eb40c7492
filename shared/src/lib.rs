//! Shared types and models for the Veridian air quality platform
//!
//! This crate contains the air quality arithmetic and the types shared between
//! the gateway server, the browser (via WASM), and other components.

pub mod air_quality;
pub mod models;
pub mod session;
pub mod simulation;
pub mod types;
pub mod validation;

pub use air_quality::*;
pub use models::*;
pub use simulation::*;
pub use types::*;
pub use validation::*;
