//! Bio-urban tree simulation
//!
//! Turns a reading and a selected area into a planting plan: how many trees,
//! where to put them, and the projected effect on the AQI. The reduction and
//! cost figures are heuristics carried over from the product's planning
//! screens, not environmental science.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::air_quality::{
    classify_aqi, compute_aqi, compute_pollution_index, estimate_trees_needed, AqiLevel,
};
use crate::models::PollutantReading;
use crate::types::{BoundingBox, GpsCoordinates};
use crate::validation::{validate_reading, ValidationError};

/// Reduction credited to one tree on one km², in percent
pub const REDUCTION_PER_TREE_PERCENT: f64 = 0.5;

/// Upper bound on the projected reduction, in percent
pub const MAX_REDUCTION_PERCENT: f64 = 70.0;

/// Kilometres per degree of latitude, used to size the planting grid
pub const KM_PER_DEGREE: f64 = 111.0;

/// Trees a crew plants per day
pub const TREES_PER_INSTALL_DAY: u64 = 10;

/// People served per km² of cleaned area
pub const PEOPLE_PER_KM2: f64 = 10_000.0;

/// Planting density ceiling
pub const MAX_TREES_PER_KM2: f64 = 100.0;

/// Largest area a single simulation will plan
pub const MAX_SIMULATION_AREA_KM2: f64 = 10_000.0;

/// Input to a simulation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub location: String,
    pub bounds: BoundingBox,
    pub reading: PollutantReading,
    /// Site altitude in metres
    #[serde(default)]
    pub altitude: f64,
}

/// Where to plant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreePlacement {
    pub latitude: f64,
    pub longitude: f64,
    pub tree_count: u32,
}

/// Outcome of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub location: String,
    pub center: GpsCoordinates,
    pub area_km2: f64,
    #[serde(rename = "currentAQI")]
    pub current_aqi: i64,
    pub current_level: AqiLevel,
    pub pollution_index: f64,
    pub trees_needed: u64,
    pub projected_reduction: f64,
    #[serde(rename = "projectedAQI")]
    pub projected_aqi: i64,
    pub projected_level: AqiLevel,
    pub tree_placements: Vec<TreePlacement>,
}

/// Check a request before [`simulate`]
///
/// The reading must be valid and the area positive and at most
/// [`MAX_SIMULATION_AREA_KM2`].
pub fn validate_simulation_request(request: &SimulationRequest) -> Result<(), ValidationError> {
    validate_reading(&request.reading)?;
    let area = request.bounds.area_km2();
    if !area.is_finite() || area <= 0.0 {
        return Err(ValidationError::invalid("bounds", "Area must be positive"));
    }
    if area > MAX_SIMULATION_AREA_KM2 {
        return Err(ValidationError::invalid("bounds", "Area must be at most 10000 km²"));
    }
    Ok(())
}

/// Most trees the plan will place on `area_km2`, never fewer than one
pub fn max_trees_for_area(area_km2: f64) -> u64 {
    // `as` saturates, so NaN and negative areas land on 0 before the floor
    ((area_km2 * MAX_TREES_PER_KM2).floor() as u64).max(1)
}

/// Run the simulation for a request
///
/// The tree count is [`estimate_trees_needed`] limited to
/// [`max_trees_for_area`]. Callers handling untrusted input run
/// [`validate_simulation_request`] first.
pub fn simulate(request: &SimulationRequest) -> SimulationResult {
    let area_km2 = request.bounds.area_km2();
    let center = request.bounds.center();
    let reading = &request.reading;

    let current_aqi = compute_aqi(reading.pm25);
    let pollution_index =
        compute_pollution_index(reading.temperature, reading.pm25, reading.co, request.altitude);
    let trees_needed =
        estimate_trees_needed(pollution_index, area_km2).min(max_trees_for_area(area_km2));
    let projected_reduction = projected_reduction_percent(trees_needed, area_km2);
    let projected_aqi = projected_aqi(current_aqi, projected_reduction);

    SimulationResult {
        location: request.location.clone(),
        center,
        area_km2,
        current_aqi,
        current_level: classify_aqi(current_aqi).level,
        pollution_index,
        trees_needed,
        projected_reduction,
        projected_aqi,
        projected_level: classify_aqi(projected_aqi).level,
        tree_placements: plan_tree_placements(center, trees_needed, area_km2),
    }
}

/// Percent reduction from `trees` over `area_km2`, capped and rounded to 2 places
pub fn projected_reduction_percent(trees: u64, area_km2: f64) -> f64 {
    let per_tree = if area_km2 > 0.0 {
        REDUCTION_PER_TREE_PERCENT / area_km2
    } else {
        REDUCTION_PER_TREE_PERCENT
    };
    let total = (trees as f64 * per_tree).min(MAX_REDUCTION_PERCENT);
    (total * 100.0).round() / 100.0
}

/// AQI after a percent reduction, truncated toward zero and floored at 0
pub fn projected_aqi(current_aqi: i64, reduction_percent: f64) -> i64 {
    let projected = (current_aqi as f64 * (1.0 - reduction_percent / 100.0)).trunc() as i64;
    projected.max(0)
}

/// Lay `trees` out on a square grid centred on `center`
///
/// The grid has `ceil(sqrt(trees))` columns; its cell size in degrees is
/// `sqrt(area) / 111 / columns`. Coordinates are rounded to 6 decimals.
pub fn plan_tree_placements(center: GpsCoordinates, trees: u64, area_km2: f64) -> Vec<TreePlacement> {
    if trees == 0 {
        return Vec::new();
    }
    let grid = (trees as f64).sqrt().ceil() as u64;
    let offset = area_km2.max(0.0).sqrt() / KM_PER_DEGREE / grid as f64;
    let half = grid as f64 / 2.0;

    (0..grid)
        .flat_map(|row| (0..grid).map(move |col| (row, col)))
        .take(trees as usize)
        .map(|(row, col)| TreePlacement {
            latitude: round6(center.latitude + (row as f64 - half) * offset),
            longitude: round6(center.longitude + (col as f64 - half) * offset),
            tree_count: 1,
        })
        .collect()
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Cost assumptions for recommendations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostModel {
    pub cost_per_tree: Decimal,
    /// Fraction of the planting cost spent on maintenance each year
    pub maintenance_rate: Decimal,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            cost_per_tree: Decimal::from(500),
            maintenance_rate: Decimal::new(1, 1),
        }
    }
}

/// Planning advice derived from a simulation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub location: String,
    pub trees_recommended: u64,
    #[serde(rename = "currentAQI")]
    pub current_aqi: i64,
    pub current_category: String,
    #[serde(rename = "projectedAQI")]
    pub projected_aqi: i64,
    pub projected_category: String,
    pub projected_reduction: f64,
    pub estimated_cost: Decimal,
    pub cost_per_tree: Decimal,
    pub annual_maintenance: Decimal,
    pub installation_days: u64,
    pub people_served: u64,
    pub benefits: Vec<String>,
}

/// Build recommendations for a simulation under `costs`
pub fn recommend(result: &SimulationResult, costs: &CostModel) -> Recommendation {
    let estimated_cost = costs.cost_per_tree * Decimal::from(result.trees_needed);
    let annual_maintenance = (estimated_cost * costs.maintenance_rate).round_dp(2);
    let people_served = (result.area_km2.max(0.0) * PEOPLE_PER_KM2) as u64;

    Recommendation {
        location: result.location.clone(),
        trees_recommended: result.trees_needed,
        current_aqi: result.current_aqi,
        current_category: result.current_level.label().to_string(),
        projected_aqi: result.projected_aqi,
        projected_category: result.projected_level.label().to_string(),
        projected_reduction: result.projected_reduction,
        estimated_cost,
        cost_per_tree: costs.cost_per_tree,
        annual_maintenance,
        installation_days: result.trees_needed.div_ceil(TREES_PER_INSTALL_DAY),
        people_served,
        benefits: vec![
            format!(
                "Reduce AQI from {} to ~{}",
                result.current_aqi, result.projected_aqi
            ),
            "10x more effective than traditional trees".to_string(),
            format!("Clean air for ~{} people", people_served),
            "Minimal water and maintenance required".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delhi_request() -> SimulationRequest {
        SimulationRequest {
            location: "Central Park, New Delhi".to_string(),
            bounds: BoundingBox {
                min_lat: 28.60,
                max_lat: 28.62,
                min_lon: 77.20,
                max_lon: 77.22,
            },
            reading: PollutantReading {
                pm25: 85.0,
                pm10: 120.0,
                no2: 45.0,
                o3: 30.0,
                co: 850.0,
                temperature: 28.0,
                humidity: 55.0,
            },
            altitude: 200.0,
        }
    }

    #[test]
    fn test_simulate_delhi_block() {
        let result = simulate(&delhi_request());

        // 0.02° × 0.02° at ~28.6°N
        assert!((result.area_km2 - 4.34).abs() < 0.01, "area {}", result.area_km2);
        assert_eq!(result.current_aqi, 182);
        assert_eq!(result.current_level, AqiLevel::Unhealthy);
        assert!((result.pollution_index - 902.4).abs() < 1e-9);
        // ceil(902.4 × 4.34 / 100)
        assert_eq!(result.trees_needed, 40);
        assert_eq!(result.tree_placements.len(), 40);
        assert!(result.projected_reduction > 0.0);
        assert!(result.projected_aqi < result.current_aqi);
    }

    #[test]
    fn test_trees_limited_by_planting_density() {
        let mut request = delhi_request();
        request.bounds = BoundingBox {
            min_lat: 0.0,
            max_lat: 0.1,
            min_lon: 0.0,
            max_lon: 0.1,
        };
        request.reading.co = 1_000_000.0;
        assert!(validate_simulation_request(&request).is_ok());

        let result = simulate(&request);
        let limit = max_trees_for_area(result.area_km2);

        assert!(estimate_trees_needed(result.pollution_index, result.area_km2) > limit);
        assert_eq!(result.trees_needed, limit);
        assert!(result.trees_needed as f64 <= result.area_km2 * MAX_TREES_PER_KM2);
        assert_eq!(result.tree_placements.len() as u64, limit);
        // 100 trees per km² credit 0.5% each per km²
        assert!((result.projected_reduction - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_max_trees_for_area() {
        assert_eq!(max_trees_for_area(4.0), 400);
        assert_eq!(max_trees_for_area(0.005), 1);
        assert_eq!(max_trees_for_area(0.0), 1);
    }

    #[test]
    fn test_validate_simulation_request() {
        assert!(validate_simulation_request(&delhi_request()).is_ok());

        let mut flat = delhi_request();
        flat.bounds.max_lat = flat.bounds.min_lat;
        assert_eq!(
            validate_simulation_request(&flat),
            Err(ValidationError::invalid("bounds", "Area must be positive"))
        );

        // Roughly 1.2 million km² around the equator
        let mut huge = delhi_request();
        huge.bounds = BoundingBox {
            min_lat: -5.0,
            max_lat: 5.0,
            min_lon: 0.0,
            max_lon: 10.0,
        };
        assert_eq!(
            validate_simulation_request(&huge),
            Err(ValidationError::invalid("bounds", "Area must be at most 10000 km²"))
        );

        let mut dirty = delhi_request();
        dirty.reading.co = f64::INFINITY;
        assert!(validate_simulation_request(&dirty).is_err());
    }

    #[test]
    fn test_reduction_is_capped() {
        assert_eq!(projected_reduction_percent(1000, 1.0), MAX_REDUCTION_PERCENT);
        assert_eq!(projected_reduction_percent(10, 2.0), 2.5);
        // Degenerate area credits the flat per-tree rate
        assert_eq!(projected_reduction_percent(3, 0.0), 1.5);
    }

    #[test]
    fn test_projected_aqi_truncates() {
        assert_eq!(projected_aqi(182, 2.5), 177);
        assert_eq!(projected_aqi(100, 70.0), 30);
        assert_eq!(projected_aqi(0, 50.0), 0);
    }

    #[test]
    fn test_placements_are_centred_grid() {
        let center = GpsCoordinates::new(28.61, 77.21);
        let placements = plan_tree_placements(center, 5, 4.0);

        assert_eq!(placements.len(), 5);
        // 3 × 3 grid, cell = 2 / 111 / 3 degrees
        let cell = 2.0 / 111.0 / 3.0;
        assert!((placements[0].latitude - round6(28.61 - 1.5 * cell)).abs() < 1e-9);
        assert!((placements[1].longitude - round6(77.21 - 0.5 * cell)).abs() < 1e-9);
        assert!(placements.iter().all(|p| p.tree_count == 1));
    }

    #[test]
    fn test_single_tree_on_degenerate_area() {
        let mut request = delhi_request();
        request.bounds.max_lat = request.bounds.min_lat;
        let result = simulate(&request);

        assert_eq!(result.area_km2, 0.0);
        assert_eq!(result.trees_needed, 1);
        assert_eq!(result.tree_placements.len(), 1);
    }

    #[test]
    fn test_recommendation_costs() {
        let result = simulate(&delhi_request());
        let rec = recommend(&result, &CostModel::default());

        assert_eq!(rec.trees_recommended, 40);
        assert_eq!(rec.estimated_cost, Decimal::from(20_000));
        assert_eq!(rec.annual_maintenance, Decimal::from(2_000));
        assert_eq!(rec.installation_days, 4);
        assert_eq!(rec.current_category, "Unhealthy");
        assert_eq!(rec.benefits.len(), 4);
        assert!(rec.benefits[0].starts_with("Reduce AQI from 182"));
    }

    #[test]
    fn test_recommendation_installation_rounds_up() {
        let mut result = simulate(&delhi_request());
        result.trees_needed = 11;
        let rec = recommend(&result, &CostModel::default());
        assert_eq!(rec.installation_days, 2);
    }
}
