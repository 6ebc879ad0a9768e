//! Great-circle distance between geographic coordinates.
//!
//! Pure math, no I/O. The matcher calls [`distance_meters`] once per
//! pharmacy per request, so everything here stays allocation-free.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A geographic coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `true` when both coordinates are inside the valid WGS84 ranges
    /// (latitude [-90, 90], longitude [-180, 180]).
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Haversine distance between two points, in meters.
///
/// Symmetric, and zero when both points are identical.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SF_DOWNTOWN: GeoPoint = GeoPoint {
        latitude: 37.7749,
        longitude: -122.4194,
    };
    const SF_MISSION: GeoPoint = GeoPoint {
        latitude: 37.7600,
        longitude: -122.4200,
    };
    const OAKLAND: GeoPoint = GeoPoint {
        latitude: 37.8044,
        longitude: -122.2712,
    };
    const NEW_YORK: GeoPoint = GeoPoint {
        latitude: 40.7128,
        longitude: -74.0060,
    };

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance_meters(SF_DOWNTOWN, SF_DOWNTOWN), 0.0);
    }

    #[test]
    fn downtown_to_mission_is_about_1_7km() {
        let d = distance_meters(SF_DOWNTOWN, SF_MISSION);
        assert!((1_500.0..1_800.0).contains(&d), "got {}m", d);
    }

    #[test]
    fn downtown_to_oakland_exceeds_10km() {
        let d = distance_meters(SF_DOWNTOWN, OAKLAND);
        assert!((12_000.0..15_000.0).contains(&d), "got {}m", d);
    }

    #[test]
    fn cross_country_distance_is_thousands_of_km() {
        let d = distance_meters(SF_DOWNTOWN, NEW_YORK);
        assert!(d > 4_000_000.0, "got {}m", d);
    }

    #[test]
    fn equator_and_prime_meridian_are_valid_coordinates() {
        assert!(GeoPoint::new(0.0, 0.0).is_valid());
    }

    #[test]
    fn out_of_range_coordinates_are_invalid() {
        assert!(!GeoPoint::new(90.1, 0.0).is_valid());
        assert!(!GeoPoint::new(-90.1, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 180.1).is_valid());
        assert!(!GeoPoint::new(0.0, -180.1).is_valid());
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            lat_a in -90.0f64..90.0,
            lon_a in -180.0f64..180.0,
            lat_b in -90.0f64..90.0,
            lon_b in -180.0f64..180.0,
        ) {
            let a = GeoPoint::new(lat_a, lon_a);
            let b = GeoPoint::new(lat_b, lon_b);
            let ab = distance_meters(a, b);
            let ba = distance_meters(b, a);
            prop_assert!((ab - ba).abs() < 1e-6);
        }

        #[test]
        fn distance_is_never_negative(
            lat_a in -90.0f64..90.0,
            lon_a in -180.0f64..180.0,
            lat_b in -90.0f64..90.0,
            lon_b in -180.0f64..180.0,
        ) {
            let d = distance_meters(GeoPoint::new(lat_a, lon_a), GeoPoint::new(lat_b, lon_b));
            prop_assert!(d >= 0.0);
        }

        #[test]
        fn distance_to_self_is_zero_everywhere(
            lat in -90.0f64..90.0,
            lon in -180.0f64..180.0,
        ) {
            let p = GeoPoint::new(lat, lon);
            prop_assert_eq!(distance_meters(p, p), 0.0);
        }
    }
}
