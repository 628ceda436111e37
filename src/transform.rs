//! Provides the elementary transforms between adjacent systems.
//!
//! Every function takes `(longitude, latitude)` in degrees and
//! returns a new `(longitude, latitude)` pair in degrees.
//!
//! The GCJ02 and BD09 offsets are empirical and tuned for mainland China.
//! Inputs outside of it are computed through without rejection,
//! but the resulting offsets are large and carry no meaning.
use std::f64::consts::PI;

/// The angular scale of the BD09 perturbation, π × 3000 / 180.
pub const X_PI: f64 = PI * 3000.0 / 180.0;

/// The semi-major axis \[m\] of the Krasovsky ellipsoid used by GCJ02.
pub const KRASOVSKY_A: f64 = 6378245.0;

/// The eccentricity squared of the Krasovsky ellipsoid used by GCJ02.
#[allow(clippy::excessive_precision)]
pub const KRASOVSKY_EE: f64 = 0.00669342162296594323;

/// The longitude offset of BD09 from GCJ02 \[deg\].
const BD09_LNG_OFFSET: f64 = 0.0065;
/// The latitude offset of BD09 from GCJ02 \[deg\].
const BD09_LAT_OFFSET: f64 = 0.006;

/// The MapBar fixed-point scale, 1e-5 degree per unit.
const MAPBAR_SCALE: f64 = 100000.0;
/// The MapBar modulus, 360 degree in units.
const MAPBAR_MODULUS: f64 = 36000000.0;

/// The MapBar grid step \[deg\], the output of [`mapbar_to_wgs84`] is a multiple of it.
pub(crate) const MAPBAR_RESOLUTION: f64 = 1.0 / MAPBAR_SCALE;

/// Returns the GCJ02 latitude offset polynomial.
///
/// `x` and `y` are the longitude and latitude relative to (105, 35),
/// the result is in metres of arc on the Krasovsky ellipsoid.
///
/// # Example
///
/// ```
/// # use chncrs::transform::transform_lat;
/// #
/// assert!((transform_lat(11.4, 4.9) - 155.84042151351431).abs() < 1e-9);
/// ```
pub fn transform_lat(x: f64, y: f64) -> f64 {
    let mut ret = -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

/// Returns the GCJ02 longitude offset polynomial.
///
/// See [`transform_lat`].
///
/// # Example
///
/// ```
/// # use chncrs::transform::transform_lng;
/// #
/// assert!((transform_lng(11.4, 4.9) - 533.881245844763).abs() < 1e-9);
/// ```
pub fn transform_lng(x: f64, y: f64) -> f64 {
    let mut ret = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}

/// Returns the GCJ02 offset `(dlng, dlat)` \[deg\] evaluated at `(lng, lat)`.
///
/// The curvature scaling uses `lat` as given, whichever side of the
/// transform it lies on.
#[inline]
fn gcj02_offset(lng: f64, lat: f64) -> (f64, f64) {
    let dlat = transform_lat(lng - 105.0, lat - 35.0);
    let dlng = transform_lng(lng - 105.0, lat - 35.0);

    let radlat = lat / 180.0 * PI;
    let magic = radlat.sin();
    let magic = 1.0 - KRASOVSKY_EE * magic * magic;
    let sqrtmagic = magic.sqrt();

    let dlat = (dlat * 180.0) / ((KRASOVSKY_A * (1.0 - KRASOVSKY_EE)) / (magic * sqrtmagic) * PI);
    let dlng = (dlng * 180.0) / (KRASOVSKY_A / sqrtmagic * radlat.cos() * PI);
    (dlng, dlat)
}

/// Returns the GCJ02 position of the BD09 `(lng, lat)`.
///
/// This is not the exact inverse of [`gcj02_to_bd09`],
/// the round trip leaves a residual of order 1e-6 \[deg\].
///
/// # Example
///
/// ```
/// # use chncrs::transform::*;
/// #
/// let (lng, lat) = bd09_to_gcj02(116.41036949371029, 39.92133699351021);
/// assert!((lng - 116.40400040133918).abs() < 1e-9);
/// assert!((lat - 39.91499959206753).abs() < 1e-9);
/// ```
pub fn bd09_to_gcj02(lng: f64, lat: f64) -> (f64, f64) {
    let (x, y) = (lng - BD09_LNG_OFFSET, lat - BD09_LAT_OFFSET);
    let z = (x * x + y * y).sqrt() - 0.00002 * (y * X_PI).sin();
    let theta = y.atan2(x) - 0.000003 * (x * X_PI).cos();
    (z * theta.cos(), z * theta.sin())
}

/// Returns the BD09 position of the GCJ02 `(lng, lat)`.
///
/// # Example
///
/// ```
/// # use chncrs::transform::*;
/// #
/// let (lng, lat) = gcj02_to_bd09(116.404, 39.915);
/// assert!((lng - 116.41036949371029).abs() < 1e-9);
/// assert!((lat - 39.92133699351021).abs() < 1e-9);
/// ```
pub fn gcj02_to_bd09(lng: f64, lat: f64) -> (f64, f64) {
    let z = (lng * lng + lat * lat).sqrt() + 0.00002 * (lat * X_PI).sin();
    let theta = lat.atan2(lng) + 0.000003 * (lng * X_PI).cos();
    (
        z * theta.cos() + BD09_LNG_OFFSET,
        z * theta.sin() + BD09_LAT_OFFSET,
    )
}

/// Returns the WGS84 position of the GCJ02 `(lng, lat)`.
///
/// The offset is evaluated at the GCJ02 position and subtracted,
/// it is not solved exactly.
///
/// # Example
///
/// ```
/// # use chncrs::transform::*;
/// #
/// let (lng, lat) = gcj02_to_wgs84(116.41024449916938, 39.91640428150164);
/// assert!((lng - 116.40400191537934).abs() < 1e-9);
/// assert!((lat - 39.91500120257608).abs() < 1e-9);
/// ```
pub fn gcj02_to_wgs84(lng: f64, lat: f64) -> (f64, f64) {
    let (dlng, dlat) = gcj02_offset(lng, lat);
    (lng - dlng, lat - dlat)
}

/// Returns the GCJ02 position of the WGS84 `(lng, lat)`.
///
/// # Example
///
/// ```
/// # use chncrs::transform::*;
/// #
/// let (lng, lat) = wgs84_to_gcj02(116.404, 39.915);
/// assert!((lng - 116.41024449916938).abs() < 1e-9);
/// assert!((lat - 39.91640428150164).abs() < 1e-9);
/// ```
pub fn wgs84_to_gcj02(lng: f64, lat: f64) -> (f64, f64) {
    let (dlng, dlat) = gcj02_offset(lng, lat);
    (lng + dlng, lat + dlat)
}

/// Returns `(x, y)` corrected by the rotation evaluated at `(u, v)`, all in units.
#[inline]
fn mapbar_round(x: f64, y: f64, u: f64, v: f64) -> (f64, f64) {
    let (su, sv) = (u / MAPBAR_SCALE, v / MAPBAR_SCALE);
    (
        x - sv.cos() * u / 18000.0 - su.sin() * v / 9000.0,
        y - sv.sin() * u / 18000.0 - su.cos() * v / 9000.0,
    )
}

#[inline]
fn nudge(t: f64) -> f64 {
    if t > 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Returns the WGS84 position of the MapBar `(lng, lat)`.
///
/// This is the forward MapBar obfuscation, it works in integer units
/// of 1e-5 \[deg\] reduced modulo 360 \[deg\], truncating at each round.
/// The result is therefore quantized to 1e-5 \[deg\]
/// and lies in 0 <= and < 360 for both components,
/// e.g. a negative longitude wraps around.
///
/// There is no closed-form inverse, see [`wgs84_to_mapbar`](crate::wgs84_to_mapbar).
///
/// # Example
///
/// ```
/// # use chncrs::transform::*;
/// #
/// let (lng, lat) = mapbar_to_wgs84(116.4, 39.9);
/// assert!((lng - 116.40454).abs() < 1e-9);
/// assert!((lat - 39.89915).abs() < 1e-9);
/// ```
pub fn mapbar_to_wgs84(lng: f64, lat: f64) -> (f64, f64) {
    let x = (lng * MAPBAR_SCALE).rem_euclid(MAPBAR_MODULUS);
    let y = (lat * MAPBAR_SCALE).rem_euclid(MAPBAR_MODULUS);

    let (x1, y1) = mapbar_round(x, y, x, y);
    let (x1, y1) = (x1.trunc(), y1.trunc());

    let (x2, y2) = mapbar_round(x, y, x1, y1);
    let (x2, y2) = ((x2 + nudge(x)).trunc(), (y2 + nudge(y)).trunc());

    (x2 / MAPBAR_SCALE, y2 / MAPBAR_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // Beijing, Shanghai, Guangzhou, Chengdu, Urumqi, Harbin
    const CITIES: [(f64, f64); 6] = [
        (116.404, 39.915),
        (121.4737, 31.2304),
        (113.2644, 23.1291),
        (104.0665, 30.5723),
        (87.6168, 43.8256),
        (126.535, 45.8038),
    ];

    #[test]
    fn test_bd09_round_trip() {
        for (lng, lat) in CITIES {
            let (x, y) = gcj02_to_bd09(lng, lat);
            let (x, y) = bd09_to_gcj02(x, y);
            assert_abs_diff_eq!(x, lng, epsilon = 1e-4);
            assert_abs_diff_eq!(y, lat, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_bd09_not_exact_inverse() {
        let (x, y) = gcj02_to_bd09(116.404, 39.915);
        let (x, y) = bd09_to_gcj02(x, y);
        assert_ne!((x, y), (116.404, 39.915));
    }

    #[test]
    fn test_gcj02_round_trip() {
        // Beijing, Guangzhou, Chengdu, Urumqi
        for (lng, lat) in [CITIES[0], CITIES[2], CITIES[3], CITIES[4]] {
            let (x, y) = gcj02_to_wgs84(lng, lat);
            let (x, y) = wgs84_to_gcj02(x, y);
            assert_abs_diff_eq!(x, lng, epsilon = 1e-5);
            assert_abs_diff_eq!(y, lat, epsilon = 1e-5);
        }

        // the one-step inverse drifts more where the offset varies fast
        let (x, y) = gcj02_to_wgs84(126.535, 45.8038);
        let (x, y) = wgs84_to_gcj02(x, y);
        assert!((x - 126.535).abs() > 1e-5);
        assert_abs_diff_eq!(x, 126.535, epsilon = 3e-5);
        assert_abs_diff_eq!(y, 45.8038, epsilon = 3e-5);
    }

    #[test]
    fn test_gcj02_round_trip_region() {
        // 1 degree grid over mainland China, worst about 5.5e-5 at (129, 53)
        for lng in 73..=134 {
            for lat in 18..=53 {
                let (lng, lat) = (lng as f64, lat as f64);
                let (x, y) = gcj02_to_wgs84(lng, lat);
                let (x, y) = wgs84_to_gcj02(x, y);
                assert_abs_diff_eq!(x, lng, epsilon = 6e-5);
                assert_abs_diff_eq!(y, lat, epsilon = 6e-5);
            }
        }
    }

    #[test]
    fn test_gcj02_offset_magnitude() {
        // a few hundred metres in mainland China
        for (lng, lat) in CITIES {
            let (x, y) = wgs84_to_gcj02(lng, lat);
            assert!((x - lng).abs() < 0.01, "{lng}, {lat}");
            assert!((y - lat).abs() < 0.01, "{lng}, {lat}");
        }
    }

    #[test]
    fn test_out_of_china_is_computed_through() {
        // London, no rejection
        let (x, y) = wgs84_to_gcj02(-0.1278, 51.5074);
        assert_abs_diff_eq!(x, -0.10932835467395463, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 51.50472595478352, epsilon = 1e-9);
    }

    #[test]
    fn test_mapbar_quantized() {
        for (lng, lat) in CITIES {
            let (x, y) = mapbar_to_wgs84(lng, lat);
            assert_abs_diff_eq!(x * 1e5, (x * 1e5).round(), epsilon = 1e-6);
            assert_abs_diff_eq!(y * 1e5, (y * 1e5).round(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_mapbar_wraps() {
        let (x, y) = mapbar_to_wgs84(-73.9, 40.7);
        assert_abs_diff_eq!(x, 286.11679, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 40.70221, epsilon = 1e-9);

        // the nudge goes negative at the origin
        let (x, y) = mapbar_to_wgs84(0.0, 0.0);
        assert_abs_diff_eq!(x, -1e-5, epsilon = 1e-12);
        assert_abs_diff_eq!(y, -1e-5, epsilon = 1e-12);
    }

    #[test]
    fn test_nan() {
        let (x, y) = wgs84_to_gcj02(f64::NAN, 35.0);
        assert!(x.is_nan());
        assert!(y.is_nan());
    }
}
