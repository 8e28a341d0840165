//! Geographic coordinates and great-circle distance

use serde::{Deserialize, Serialize};

/// Mean earth radius in metres
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Lviv city centre, used when the user position is unknown
    pub const FALLBACK: GeoPoint = GeoPoint {
        lat: 49.8397,
        lng: 24.0297,
    };

    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both coordinates finite and inside their valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Haversine distance to `other` in metres
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        // Rounding can push `a` a hair above 1 for antipodal points
        let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

        EARTH_RADIUS_M * c
    }
}

/// Great-circle distance between two points in metres
#[inline]
pub fn haversine_distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    a.distance_to(&b)
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::FALLBACK
    }
}
