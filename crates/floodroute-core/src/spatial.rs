//! Bounding boxes and the fixed view parameters of the service area.

use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// Zoom used when the view recenters on a freshly picked point.
pub const PICK_ZOOM: f64 = 14.0;
/// Zoom of the initial view before the map fits the service area.
pub const INITIAL_ZOOM: f64 = 11.0;
/// Padding (pixels) when fitting the service area on map load.
pub const SERVICE_AREA_PADDING: f64 = 40.0;
/// Padding (pixels) when fitting a rendered route.
pub const ROUTE_PADDING: f64 = 50.0;

/// Metro Manila, the area covered by the hazard data and the geocoder viewbox.
pub const SERVICE_AREA: BoundingBox = BoundingBox {
    min: Coordinates {
        lon: 120.525732,
        lat: 14.337843,
    },
    max: Coordinates {
        lon: 121.509406,
        lat: 14.795443,
    },
};

/// Axis-aligned box in longitude/latitude space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// South-west corner
    pub min: Coordinates,
    /// North-east corner
    pub max: Coordinates,
}

impl BoundingBox {
    pub fn from_point(point: Coordinates) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |bounds, point| bounds.extend(point)))
    }

    pub fn extend(self, point: Coordinates) -> Self {
        Self {
            min: Coordinates::new(self.min.lon.min(point.lon), self.min.lat.min(point.lat)),
            max: Coordinates::new(self.max.lon.max(point.lon), self.max.lat.max(point.lat)),
        }
    }

    pub fn center(&self) -> Coordinates {
        Coordinates::new(
            (self.min.lon + self.max.lon) / 2.0,
            (self.min.lat + self.max.lat) / 2.0,
        )
    }
}
