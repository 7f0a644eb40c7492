//! Common types used across the platform

use serde::{Deserialize, Serialize};

use crate::air_quality::area_from_bounding_box;

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components are finite and inside the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Default map centre (New Delhi)
pub const DEFAULT_CENTER: GpsCoordinates = GpsCoordinates {
    latitude: 28.6139,
    longitude: 77.2090,
};

/// Half-width in degrees of the window fetched around a map centre
pub const DEFAULT_MAP_DELTA_DEG: f64 = 0.5;

/// Axis-aligned latitude/longitude box
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Build a box from two opposite corners in any order
    pub fn from_corners(a: GpsCoordinates, b: GpsCoordinates) -> Self {
        Self {
            min_lat: a.latitude.min(b.latitude),
            max_lat: a.latitude.max(b.latitude),
            min_lon: a.longitude.min(b.longitude),
            max_lon: a.longitude.max(b.longitude),
        }
    }

    /// Square window of `delta_deg` on each side of `center`
    pub fn around(center: GpsCoordinates, delta_deg: f64) -> Self {
        Self {
            min_lat: center.latitude - delta_deg,
            max_lat: center.latitude + delta_deg,
            min_lon: center.longitude - delta_deg,
            max_lon: center.longitude + delta_deg,
        }
    }

    pub fn center(&self) -> GpsCoordinates {
        GpsCoordinates::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Approximate surface area in km²
    pub fn area_km2(&self) -> f64 {
        area_from_bounding_box(self.min_lat, self.max_lat, self.min_lon, self.max_lon)
    }

    pub fn contains(&self, point: GpsCoordinates) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lon..=self.max_lon).contains(&point.longitude)
    }

    // North/south/east/west naming used by map query strings
    pub fn north(&self) -> f64 {
        self.max_lat
    }

    pub fn south(&self) -> f64 {
        self.min_lat
    }

    pub fn east(&self) -> f64 {
        self.max_lon
    }

    pub fn west(&self) -> f64 {
        self.min_lon
    }
}

/// Supported interface languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Spanish => "es",
            Language::French => "fr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes_order() {
        let bbox = BoundingBox::from_corners(
            GpsCoordinates::new(28.7, 77.3),
            GpsCoordinates::new(28.5, 77.1),
        );
        assert_eq!(bbox.min_lat, 28.5);
        assert_eq!(bbox.max_lat, 28.7);
        assert_eq!(bbox.min_lon, 77.1);
        assert_eq!(bbox.max_lon, 77.3);
    }

    #[test]
    fn test_around_and_center() {
        let bbox = BoundingBox::around(DEFAULT_CENTER, DEFAULT_MAP_DELTA_DEG);
        let center = bbox.center();
        assert!((center.latitude - DEFAULT_CENTER.latitude).abs() < 1e-9);
        assert!((center.longitude - DEFAULT_CENTER.longitude).abs() < 1e-9);
        assert!(bbox.contains(DEFAULT_CENTER));
        assert!(!bbox.contains(GpsCoordinates::new(0.0, 0.0)));
    }

    #[test]
    fn test_coordinates_validity() {
        assert!(GpsCoordinates::new(28.6, 77.2).is_valid());
        assert!(!GpsCoordinates::new(91.0, 0.0).is_valid());
        assert!(!GpsCoordinates::new(0.0, -181.0).is_valid());
        assert!(!GpsCoordinates::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_language_serde_codes() {
        let json = serde_json::to_string(&Language::Hindi).unwrap();
        assert_eq!(json, "\"hi\"");
        let parsed: Language = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(parsed, Language::French);
        assert_eq!(Language::default().code(), "en");
    }
}
