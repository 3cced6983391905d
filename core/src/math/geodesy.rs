//! Spherical-earth navigation helpers.
//!
//! Inputs and outputs are in degrees; everything in between is radians.
//! Longitudes are returned in [-180, 180), bearings in [0, 360).

/// Kilometres per nautical mile.
pub const KM_PER_NM: f64 = 1.852;

/// Distance covered at `sog_knots` over `minutes`, in kilometres.
pub fn distance_km(sog_knots: f64, minutes: f64) -> f64 {
    sog_knots * KM_PER_NM / 60.0 * minutes
}

/// Wraps a longitude into [-180, 180).
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid may round up to exactly 360 for tiny negative inputs
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Wraps a bearing into [0, 360).
pub fn normalize_bearing(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Smallest angle between two headings, in [0, 180].
pub fn heading_delta(from_deg: f64, to_deg: f64) -> f64 {
    let diff = (to_deg - from_deg).rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Destination reached from (`lat`, `lon`) travelling `distance_km` along the
/// initial bearing `bearing_deg` on a sphere of radius `radius_km`.
pub fn destination(
    lat: f64,
    lon: f64,
    bearing_deg: f64,
    distance_km: f64,
    radius_km: f64,
) -> (f64, f64) {
    if distance_km == 0.0 {
        return (lat, lon);
    }

    let delta = distance_km / radius_km;
    let theta = bearing_deg.to_radians();
    let phi1 = lat.to_radians();
    let lambda1 = lon.to_radians();

    let sin_phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos())
        .clamp(-1.0, 1.0);
    let phi2 = sin_phi2.asin();
    let y = theta.sin() * delta.sin() * phi1.cos();
    let x = delta.cos() - phi1.sin() * sin_phi2;
    let lambda2 = lambda1 + y.atan2(x);

    (phi2.to_degrees(), normalize_longitude(lambda2.to_degrees()))
}

/// Initial great-circle bearing from the first point towards the second.
pub fn initial_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    normalize_bearing(y.atan2(x).to_degrees())
}

/// Great-circle distance between two points on a sphere of radius `radius_km`.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius_km: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().clamp(0.0, 1.0).asin();
    radius_km * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::EARTH_RADIUS_KM;

    const EPS: f64 = 1e-9;

    #[test]
    fn heading_delta_wraps_through_north() {
        assert!((heading_delta(350.0, 10.0) - 20.0).abs() < EPS);
        assert!((heading_delta(10.0, 350.0) - 20.0).abs() < EPS);
        assert!((heading_delta(0.0, 180.0) - 180.0).abs() < EPS);
        assert!((heading_delta(90.0, 90.0)).abs() < EPS);
    }

    #[test]
    fn longitude_normalization_is_half_open() {
        assert_eq!(normalize_longitude(180.0), -180.0);
        assert_eq!(normalize_longitude(-180.0), -180.0);
        assert!((normalize_longitude(190.0) + 170.0).abs() < EPS);
        assert!((normalize_longitude(-190.0) - 170.0).abs() < EPS);
        assert!((normalize_longitude(-70.91) + 70.91).abs() < EPS);
    }

    #[test]
    fn destination_crosses_date_line() {
        let (lat, lon) = destination(0.0, 179.9, 90.0, 50.0, EARTH_RADIUS_KM);
        assert!(lat.abs() < 1e-6);
        assert!((-180.0..180.0).contains(&lon));
        assert!(lon < -179.0);
    }

    #[test]
    fn destination_near_pole_stays_in_range() {
        let (lat, _lon) = destination(89.999, 0.0, 0.0, 10.0, EARTH_RADIUS_KM);
        assert!((-90.0..=90.0).contains(&lat));
        let (lat, lon) = destination(90.0, 0.0, 45.0, 1.0, EARTH_RADIUS_KM);
        assert!(lat.is_finite() && lon.is_finite());
        assert!(lat < 90.0);
    }

    #[test]
    fn haversine_scales_with_radius() {
        let (lat2, lon2) = destination(10.0, 20.0, 135.0, 50.0, 3000.0);
        assert!((haversine_km(10.0, 20.0, lat2, lon2, 3000.0) - 50.0).abs() < 1e-6);
        let mean = haversine_km(10.0, 20.0, lat2, lon2, EARTH_RADIUS_KM);
        assert!((mean - 50.0 * EARTH_RADIUS_KM / 3000.0).abs() < 1e-6);
    }

    #[test]
    fn one_degree_of_arc_along_meridian() {
        let arc_km = EARTH_RADIUS_KM * 1f64.to_radians();
        let (lat, lon) = destination(10.0, 20.0, 0.0, arc_km, EARTH_RADIUS_KM);
        assert!((lat - 11.0).abs() < 1e-9);
        assert!((lon - 20.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_and_distance_agree_with_destination() {
        let (lat2, lon2) = destination(41.64, -70.85, 63.0, 120.0, EARTH_RADIUS_KM);
        assert!((haversine_km(41.64, -70.85, lat2, lon2, EARTH_RADIUS_KM) - 120.0).abs() < 1e-6);
        assert!((initial_bearing(41.64, -70.85, lat2, lon2) - 63.0).abs() < 1e-6);
    }
}
