//! Approximate WGS84 → RD New (EPSG:28992) transformation.
//!
//! The Dutch national grid is a stereographic projection on the Bessel
//! ellipsoid, but for points in and around the Netherlands it is
//! approximated to well under a meter by two bivariate polynomials in the
//! offsets from the Amersfoort reference point:
//!
//! ```text
//! dF = 0.36 * (lat - F0)          dL = 0.36 * (lon - L0)
//! x  = X0 + Σ R[i] · dF^Rp[i] · dL^Rq[i]
//! y  = Y0 + Σ S[i] · dF^Sp[i] · dL^Sq[i]
//! ```
//!
//! The 0.36 factor turns degrees into units of 10 000 arc-seconds.
//! Nothing is bounds-checked: points far from the Netherlands produce
//! numbers, just not meaningful ones.

use wms_common::CrsCode;

/// Easting of the Amersfoort reference point (meters).
pub const X0: f64 = 155000.0;
/// Northing of the Amersfoort reference point (meters).
pub const Y0: f64 = 463000.0;
/// Latitude of the Amersfoort reference point (degrees).
pub const F0: f64 = 52.15517440;
/// Longitude of the Amersfoort reference point (degrees).
pub const L0: f64 = 5.38720621;

const DEGREE_SCALE: f64 = 0.36;

// (coefficient, dF exponent, dL exponent)
const R_TERMS: [(f64, i32, i32); 9] = [
    (190094.945, 0, 1),
    (-11832.228, 1, 1),
    (-114.221, 2, 1),
    (-32.391, 0, 3),
    (-0.705, 1, 0),
    (-2.34, 3, 1),
    (-0.608, 1, 3),
    (-0.008, 0, 2),
    (0.148, 2, 3),
];

const S_TERMS: [(f64, i32, i32); 10] = [
    (309056.544, 1, 0),
    (3638.893, 0, 2),
    (73.077, 2, 0),
    (-157.984, 1, 2),
    (59.788, 3, 0),
    (0.433, 0, 1),
    (-6.439, 2, 2),
    (-0.032, 1, 1),
    (0.092, 0, 4),
    (-0.054, 1, 4),
];

/// The RD New polynomial projection.
#[derive(Debug, Clone, Copy, Default)]
pub struct RdNew;

impl RdNew {
    /// CRS identifier of the projected output.
    pub const CRS: CrsCode = CrsCode::Epsg28992;

    /// Convert geographic coordinates (degrees) to RD New (x, y) in meters.
    pub fn geo_to_rd(&self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        let df = DEGREE_SCALE * (lat_deg - F0);
        let dl = DEGREE_SCALE * (lon_deg - L0);

        (X0 + evaluate(&R_TERMS, df, dl), Y0 + evaluate(&S_TERMS, df, dl))
    }

    /// Rough geographic envelope in which the polynomial fit is trustworthy.
    ///
    /// Returns (min_lon, min_lat, max_lon, max_lat) in degrees.
    pub fn geographic_bounds(&self) -> (f64, f64, f64, f64) {
        (3.0, 50.5, 7.5, 54.0)
    }

    /// Check if a geographic point lies inside [`RdNew::geographic_bounds`].
    pub fn contains(&self, lat_deg: f64, lon_deg: f64) -> bool {
        let (min_lon, min_lat, max_lon, max_lat) = self.geographic_bounds();
        (min_lat..=max_lat).contains(&lat_deg) && (min_lon..=max_lon).contains(&lon_deg)
    }
}

fn evaluate(terms: &[(f64, i32, i32)], df: f64, dl: f64) -> f64 {
    // powi(0) is 1.0 even for a 0.0 base
    terms
        .iter()
        .map(|&(coef, p, q)| coef * df.powi(p) * dl.powi(q))
        .sum()
}
