//! External API integrations

pub mod pollution;

pub use pollution::{LocationQuery, PollutionApiClient};
