//! Geographic and projected point types.

use projection::RdNew;

/// WGS84 location in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Project onto RD New. Never fails; see [`RdNew`] for the validity area.
    pub fn project(&self) -> ProjectedCoordinate {
        let (x, y) = RdNew.geo_to_rd(self.latitude, self.longitude);
        ProjectedCoordinate { x, y }
    }

    /// Whether the point lies where the RD polynomial fit is meaningful.
    pub fn in_projection_area(&self) -> bool {
        RdNew.contains(self.latitude, self.longitude)
    }
}

/// RD New (EPSG:28992) location in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedCoordinate {
    pub x: f64,
    pub y: f64,
}
