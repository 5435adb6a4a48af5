//! Flat-earth geodesic helpers
//!
//! Provides the scaling constants and integer lat/lng arithmetic used by
//! [`Location`](crate::Location). Positions are fixed-point: latitude and
//! longitude in units of 1e-7 degree, altitude in centimeters.
//!
//! All math here is a local tangent-plane approximation: one unit of
//! latitude is worth a fixed number of meters and longitude is compressed
//! by the cosine of the latitude. This is accurate over short ranges
//! (tens of kilometers) and intentionally ignores ellipsoidal geodesy.

/// Earth radius (meters) from which the latitude scaling factor derives
pub const EARTH_RADIUS_M: f64 = 6_378_100.0;

/// Meters per 1e-7 degree of latitude
pub const LATLON_TO_M: f64 = 0.011131884502145034;

/// 1e-7 degrees of latitude per meter
pub const LATLON_TO_M_INV: f64 = 89.83204953368922;

/// Centimeters per 1e-7 degree of latitude
pub const LATLON_TO_CM: f64 = 1.1131884502145034;

/// Returns the longitude compression factor at the given latitude (1e-7 deg).
///
/// Floored at 0.01 so longitude arithmetic stays finite near the poles.
pub fn longitude_scale(lat_e7: i64) -> f64 {
    let scale = (lat_e7 as f64 * 1.0e-7).to_radians().cos();
    scale.max(0.01)
}

/// Folds a longitude (1e-7 deg) back into the valid circular range.
///
/// Values beyond +/-1,800,000,000 are brought back by one full turn.
/// Takes a 64-bit value so callers can add offsets without overflow
/// before narrowing.
pub fn wrap_longitude(lon_e7: i64) -> i32 {
    let mut lon = lon_e7;
    if lon > 1_800_000_000 {
        lon -= 3_600_000_000;
    } else if lon < -1_800_000_000 {
        lon += 3_600_000_000;
    }
    lon as i32
}

/// Returns the signed shortest difference `lon1 - lon2` on the circular
/// longitude domain (1e-7 deg).
pub fn diff_longitude(lon1: i32, lon2: i32) -> i32 {
    // same side of the date line, no wrap possible
    if (lon1 < 0) == (lon2 < 0) {
        return lon1 - lon2;
    }
    let mut dlon = i64::from(lon1) - i64::from(lon2);
    if dlon > 1_800_000_000 {
        dlon -= 3_600_000_000;
    } else if dlon < -1_800_000_000 {
        dlon += 3_600_000_000;
    }
    dlon as i32
}

/// Reflects an out-of-range latitude (1e-7 deg) back into range as if
/// passing over the pole.
pub fn limit_latitude(lat_e7: i64) -> i32 {
    if lat_e7 > 900_000_000 {
        (1_800_000_000 - lat_e7) as i32
    } else if lat_e7 < -900_000_000 {
        (-(1_800_000_000 + lat_e7)) as i32
    } else {
        lat_e7 as i32
    }
}

/// Returns true if the latitude (1e-7 deg) is within +/-90 degrees
pub fn check_lat(lat: i32) -> bool {
    (-900_000_000..=900_000_000).contains(&lat)
}

/// Returns true if the longitude (1e-7 deg) is within +/-180 degrees
pub fn check_lng(lng: i32) -> bool {
    (-1_800_000_000..=1_800_000_000).contains(&lng)
}

/// Applies a north/east offset in meters to a lat/lng pair (1e-7 deg).
///
/// The inverse of the tangent-plane projection: latitude moves by
/// `north_m` at the fixed scale and is pole-reflected if it leaves the
/// valid range; longitude moves by `east_m` compressed at the midpoint
/// latitude and is wrapped, with the sum held in 64 bits until the final
/// narrowing.
pub fn offset_latlng(lat: &mut i32, lng: &mut i32, north_m: f64, east_m: f64) {
    let dlat = (north_m * LATLON_TO_M_INV).round() as i64;
    let scale = longitude_scale(i64::from(*lat) + dlat / 2);
    let dlng = (east_m * LATLON_TO_M_INV / scale).round() as i64;
    *lat = limit_latitude(i64::from(*lat) + dlat);
    *lng = wrap_longitude(i64::from(*lng) + dlng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_longitude_scale_equator() {
        assert_relative_eq!(longitude_scale(0), 1.0);
    }

    #[test]
    fn test_longitude_scale_mid_latitude() {
        // cos(45 deg)
        assert_relative_eq!(longitude_scale(450_000_000), 0.7071067811865476, epsilon = 1e-9);
    }

    #[test]
    fn test_longitude_scale_pole_floor() {
        assert_eq!(longitude_scale(900_000_000), 0.01);
        assert_eq!(longitude_scale(-900_000_000), 0.01);
    }

    #[test]
    fn test_wrap_longitude_in_range_untouched() {
        assert_eq!(wrap_longitude(0), 0);
        assert_eq!(wrap_longitude(1_799_999_999), 1_799_999_999);
        assert_eq!(wrap_longitude(-1_800_000_000), -1_800_000_000);
    }

    #[test]
    fn test_wrap_longitude_folds() {
        assert_eq!(wrap_longitude(1_800_000_001), -1_799_999_999);
        assert_eq!(wrap_longitude(-1_800_000_001), 1_799_999_999);
        assert_eq!(wrap_longitude(2_000_000_000), -1_600_000_000);
        assert_eq!(wrap_longitude(-2_000_000_000), 1_600_000_000);
    }

    #[test]
    fn test_wrap_longitude_idempotent() {
        for lon in [
            0_i64,
            1_234_567_890,
            -1_234_567_890,
            1_800_000_001,
            -1_800_000_001,
            2_500_000_000,
            -2_500_000_000,
        ] {
            let once = wrap_longitude(lon);
            assert_eq!(wrap_longitude(i64::from(once)), once);
            assert!((-1_800_000_000..=1_800_000_000).contains(&once));
        }
    }

    #[test]
    fn test_diff_longitude_antisymmetric() {
        let pairs = [
            (1_512_150_000, 1_512_100_000),
            (1_799_999_000, -1_799_999_000),
            (-10, 10),
            (0, 0),
        ];
        for (a, b) in pairs {
            assert_eq!(diff_longitude(a, b), -diff_longitude(b, a));
        }
        assert_eq!(diff_longitude(42, 42), 0);
    }

    #[test]
    fn test_diff_longitude_wraps_across_date_line() {
        // 179.9999 east to 179.9999 west is a short hop, not a full circle
        assert_eq!(diff_longitude(-1_799_999_000, 1_799_999_000), 2000);
        assert_eq!(diff_longitude(1_799_999_000, -1_799_999_000), -2000);
    }

    #[test]
    fn test_diff_longitude_same_sign_fast_path() {
        assert_eq!(diff_longitude(1_512_150_000, 1_512_100_000), 50_000);
        assert_eq!(diff_longitude(-338_570_000, -338_520_000), -50_000);
    }

    #[test]
    fn test_limit_latitude_reflects_over_pole() {
        assert_eq!(limit_latitude(900_000_001), 899_999_999);
        assert_eq!(limit_latitude(-900_000_001), -899_999_999);
        assert_eq!(limit_latitude(950_000_000), 850_000_000);
        assert_eq!(limit_latitude(-950_000_000), -850_000_000);
    }

    #[test]
    fn test_limit_latitude_in_range_untouched() {
        assert_eq!(limit_latitude(0), 0);
        assert_eq!(limit_latitude(900_000_000), 900_000_000);
        assert_eq!(limit_latitude(-900_000_000), -900_000_000);
    }

    #[test]
    fn test_check_latlng_bounds() {
        assert!(check_lat(900_000_000));
        assert!(check_lat(-900_000_000));
        assert!(!check_lat(900_000_001));
        assert!(check_lng(1_800_000_000));
        assert!(!check_lng(1_800_000_001));
    }

    #[test]
    fn test_offset_latlng_zero_is_identity() {
        let mut lat = -338_570_000;
        let mut lng = 1_512_150_000;
        offset_latlng(&mut lat, &mut lng, 0.0, 0.0);
        assert_eq!(lat, -338_570_000);
        assert_eq!(lng, 1_512_150_000);
    }

    #[test]
    fn test_offset_latlng_north_only_moves_latitude() {
        let mut lat = -338_570_000;
        let mut lng = 1_512_150_000;
        offset_latlng(&mut lat, &mut lng, 1000.0, 0.0);
        assert!(lat > -338_570_000);
        assert_eq!(lng, 1_512_150_000);
        // 1000 m is about 89832 units of 1e-7 deg
        assert_relative_eq!((lat + 338_570_000) as f64, 1000.0 * LATLON_TO_M_INV, epsilon = 1.0);
    }

    #[test]
    fn test_offset_latlng_wraps_longitude() {
        let mut lat = 0;
        let mut lng = 1_799_999_000;
        offset_latlng(&mut lat, &mut lng, 0.0, 50_000.0);
        assert!(lng < 0, "eastward offset across the date line wraps negative");
    }
}
