//! Domain models for the Veridian air quality platform

mod history;
mod map;
mod pollution;
mod prediction;
mod user;

pub use history::*;
pub use map::*;
pub use pollution::*;
pub use prediction::*;
pub use user::*;
