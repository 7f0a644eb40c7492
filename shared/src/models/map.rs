//! Map overlay models

use serde::{Deserialize, Serialize};

use crate::air_quality::{classify_aqi, compute_aqi, AqiLevel};
use crate::types::{BoundingBox, GpsCoordinates};

/// A sampled concentration inside a map window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapPoint {
    #[serde(flatten)]
    pub position: GpsCoordinates,
    pub pm25: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Color-coded marker handed to the mapping provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapMarker {
    #[serde(flatten)]
    pub position: GpsCoordinates,
    pub aqi: i64,
    pub level: AqiLevel,
    pub label: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl MapMarker {
    pub fn from_point(point: &MapPoint) -> Self {
        let aqi = compute_aqi(point.pm25);
        let level = classify_aqi(aqi).level;
        Self {
            position: point.position,
            aqi,
            level,
            label: level.label().to_string(),
            color: level.marker_color().to_string(),
            location: point.location.clone(),
        }
    }
}

/// Markers for a map window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapOverlay {
    pub bounds: BoundingBox,
    pub markers: Vec<MapMarker>,
}

impl MapOverlay {
    /// Build the overlay, dropping points that fall outside `bounds`
    pub fn build(bounds: BoundingBox, points: &[MapPoint]) -> Self {
        let markers = points
            .iter()
            .filter(|p| bounds.contains(p.position))
            .map(MapMarker::from_point)
            .collect();
        Self { bounds, markers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64, pm25: f64) -> MapPoint {
        MapPoint {
            position: GpsCoordinates::new(lat, lon),
            pm25,
            location: None,
        }
    }

    #[test]
    fn test_marker_colors_by_band() {
        assert_eq!(MapMarker::from_point(&point(0.0, 0.0, 5.0)).color, "#22c55e");
        assert_eq!(MapMarker::from_point(&point(0.0, 0.0, 20.0)).color, "#facc15");
        assert_eq!(MapMarker::from_point(&point(0.0, 0.0, 45.0)).color, "#f97316");
        assert_eq!(MapMarker::from_point(&point(0.0, 0.0, 85.0)).color, "#ef4444");
        assert_eq!(MapMarker::from_point(&point(0.0, 0.0, 230.0)).color, "#a855f7");
        assert_eq!(MapMarker::from_point(&point(0.0, 0.0, 400.0)).color, "#7f1d1d");
    }

    #[test]
    fn test_overlay_drops_points_outside_bounds() {
        let bounds = BoundingBox::around(GpsCoordinates::new(28.6, 77.2), 0.5);
        let points = vec![point(28.7, 77.3, 30.0), point(35.0, 77.3, 30.0)];
        let overlay = MapOverlay::build(bounds, &points);
        assert_eq!(overlay.markers.len(), 1);
        assert_eq!(overlay.markers[0].label, "Moderate");
    }
}
