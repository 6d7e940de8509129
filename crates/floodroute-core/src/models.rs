//! Core data models for the route planner.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A position on the map, stored in map order (longitude first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Label shown for a waypoint until (or unless) an address resolves.
    pub fn label(&self) -> String {
        format!("Lat: {:.6} / Lon: {:.6}", self.lat, self.lon)
    }
}

/// Stable identity of a waypoint for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaypointId(pub u32);

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wp-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Source,
    /// Destinations carry their 1-based position in the visible list.
    Destination { ordinal: usize },
}

/// A logical point in the route: the single source or one of the destinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub role: Role,
    pub label: String,
    pub coordinates: Option<Coordinates>,
}

impl Waypoint {
    pub(crate) fn new(id: WaypointId, role: Role) -> Self {
        Self {
            id,
            role,
            label: String::new(),
            coordinates: None,
        }
    }
}

/// A single forward-geocode candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(deserialize_with = "number_or_string")]
    pub lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub lon: f64,
    #[serde(deserialize_with = "trimmed")]
    pub display_name: String,
}

impl SearchHit {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lon, self.lat)
    }
}

/// Wire form of a point in an optimize request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coordinates> for LatLon {
    fn from(coords: Coordinates) -> Self {
        Self {
            lat: coords.lat,
            lon: coords.lon,
        }
    }
}

/// Body of `POST /api/optimize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub source: LatLon,
    pub destinations: Vec<LatLon>,
}

/// One vertex of a returned route. Either component may be missing upstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoutePoint {
    pub lon: Option<f64>,
    pub lat: Option<f64>,
}

impl RoutePoint {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.lon?, self.lat?))
    }
}

impl<'de> Deserialize<'de> for RoutePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
        Ok(Self {
            lon: raw.first().copied().flatten(),
            lat: raw.get(1).copied().flatten(),
        })
    }
}

/// Optimized route with its summary figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub geometry: Vec<RoutePoint>,
    pub distance_m: f64,
    pub duration_s: f64,
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_label_uses_six_decimals() {
        let coords = Coordinates::new(121.0, 14.5);
        assert_eq!(coords.label(), "Lat: 14.500000 / Lon: 121.000000");
    }

    #[test]
    fn search_hit_accepts_nominatim_string_coordinates() {
        let hit: SearchHit = serde_json::from_str(
            r#"{"lat": "14.5995", "lon": "120.9842", "display_name": "  Manila, Philippines "}"#,
        )
        .unwrap();
        assert_eq!(hit.lat, 14.5995);
        assert_eq!(hit.lon, 120.9842);
        assert_eq!(hit.display_name, "Manila, Philippines");
    }

    #[test]
    fn route_point_keeps_missing_components() {
        let points: Vec<RoutePoint> =
            serde_json::from_str("[[121.0, 14.5], [null, 14.52], [121.03]]").unwrap();
        assert_eq!(points[0].coordinates(), Some(Coordinates::new(121.0, 14.5)));
        assert_eq!(points[1].coordinates(), None);
        assert_eq!(points[2].lat, None);
    }
}
