//! Coordinate Reference System codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known CRS codes used by the advisory client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lat/lon in degrees)
    Epsg4326,
    /// Amersfoort / RD New, the Dutch national grid (meters)
    Epsg28992,
}

impl CrsCode {
    /// Get the axis order for this CRS in WMS 1.3.0.
    ///
    /// WMS 1.3.0 uses the "natural" axis order of the CRS:
    /// - Geographic CRS: lat, lon (y, x)
    /// - Projected CRS: easting, northing (x, y)
    pub fn axis_order_wms_1_3(&self) -> AxisOrder {
        match self {
            CrsCode::Epsg4326 => AxisOrder::LatLon,
            CrsCode::Epsg28992 => AxisOrder::XY,
        }
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            CrsCode::Epsg4326 => "EPSG:4326",
            CrsCode::Epsg28992 => "EPSG:28992",
        };
        write!(f, "{}", code)
    }
}

/// Axis order for coordinate interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// X (longitude/easting), Y (latitude/northing)
    XY,
    /// Y (latitude/northing), X (longitude/easting)
    LatLon,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CrsCode::Epsg28992.to_string(), "EPSG:28992");
        assert_eq!(CrsCode::Epsg4326.to_string(), "EPSG:4326");
    }

    #[test]
    fn test_axis_order() {
        assert_eq!(CrsCode::Epsg4326.axis_order_wms_1_3(), AxisOrder::LatLon);
        assert_eq!(CrsCode::Epsg28992.axis_order_wms_1_3(), AxisOrder::XY);
    }
}
