//! Configuration management for the Veridian gateway
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with VERIDIAN__ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::simulation::CostModel;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Backend Data API configuration
    pub upstream: UpstreamConfig,

    /// Browser origins allowed to call the gateway
    pub cors: CorsConfig,

    /// Cost assumptions for tree recommendations
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the Backend Data API, without a trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    /// Empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    pub cost_per_tree: Decimal,

    /// Yearly maintenance as a fraction of the planting cost
    pub maintenance_rate: Decimal,
}

impl SimulationConfig {
    pub fn cost_model(&self) -> CostModel {
        CostModel {
            cost_per_tree: self.cost_per_tree,
            maintenance_rate: self.maintenance_rate,
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("VERIDIAN__ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8080)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("upstream.base_url", "http://localhost:8000")?
            .set_default("upstream.timeout_secs", 10)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("simulation.cost_per_tree", "500")?
            .set_default("simulation.maintenance_rate", "0.1")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (VERIDIAN__ prefix)
            .add_source(
                Environment::with_prefix("VERIDIAN")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            cors: CorsConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let costs = CostModel::default();
        Self {
            cost_per_tree: costs.cost_per_tree,
            maintenance_rate: costs.maintenance_rate,
        }
    }
}
