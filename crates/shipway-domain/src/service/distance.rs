//! Great-circle distance

use shipway_types::Coordinates;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometres (unrounded)
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for near-antipodal points
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HCMC: Coordinates = Coordinates { lat: 10.7769, lng: 106.7009 };
    const HANOI: Coordinates = Coordinates { lat: 21.0278, lng: 105.8342 };

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(haversine_km(HCMC, HCMC), 0.0);
        let origin = Coordinates::new(0.0, 0.0);
        assert_eq!(haversine_km(origin, origin), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let ab = haversine_km(HCMC, HANOI);
        let ba = haversine_km(HANOI, HCMC);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_hcmc_to_hanoi() {
        let d = haversine_km(HCMC, HANOI);
        assert!((d - 1143.6).abs() < 0.5, "got {}", d);
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn test_antipodes() {
        let d = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_near_antipodal_stays_finite() {
        let a = Coordinates::new(-79.03469243524826, -150.48312544058365);
        let b = Coordinates::new(79.03469243524826, 29.51687455941635);
        let d = haversine_km(a, b);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-3, "got {}", d);
    }
}
