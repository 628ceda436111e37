//! Provides the CGCS2000 3-degree Gauss-Kruger zone projection.
//!
//! The projection is the Transverse Mercator in the Krüger n-series
//! of 6th order (Karney 2011), which is accurate to well below 1 \[mm\]
//! within a zone.
//!
//! WGS84 and CGCS2000 geographic coordinates are treated as identical,
//! no datum shift is applied.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::internal::mul_add;

/// The reference ellipsoid.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ellipsoid {
    /// The semi-major axis \[m\]
    pub a: f64,
    /// The flattening
    pub f: f64,
}

impl Ellipsoid {
    /// Makes an [`Ellipsoid`] from the semi-major axis and the inverse flattening.
    #[inline]
    pub const fn new(a: f64, rf: f64) -> Self {
        Self { a, f: 1.0 / rf }
    }

    /// Returns the first eccentricity squared, 2𝑓 − 𝑓².
    #[inline]
    pub const fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Returns the first eccentricity.
    #[inline]
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Returns the third flattening, 𝑓 / (2 − 𝑓).
    #[inline]
    pub const fn n(&self) -> f64 {
        self.f / (2.0 - self.f)
    }
}

/// The CGCS2000 ellipsoid.
pub const CGCS2000: Ellipsoid = Ellipsoid::new(6378137.0, 298.257222101);

/// The false easting of the zones \[m\].
pub const FALSE_EASTING: f64 = 500000.0;

/// The easting offset per zone number of the zone-million encoding \[m\].
pub const ZONE_MILLION: f64 = 1_000_000.0;

/// Returns the 3-degree zone number of `lon` \[deg\].
///
/// It is ⌊(`lon` + 1.5) / 3⌋, depending on longitude only.
/// This returns 0 for NaN.
///
/// # Example
///
/// ```
/// # use chncrs::projection::lon_to_3deg_zone;
/// #
/// assert_eq!(lon_to_3deg_zone(116.4), 39);
/// assert_eq!(lon_to_3deg_zone(115.5), 39);
/// assert_eq!(lon_to_3deg_zone(115.4999), 38);
/// ```
#[inline]
pub fn lon_to_3deg_zone(lon: f64) -> i32 {
    ((lon + 1.5) / 3.0).floor() as i32
}

/// Returns the central meridian \[deg\] of the 3-degree `zone`.
///
/// # Example
///
/// ```
/// # use chncrs::projection::central_meridian;
/// #
/// assert_eq!(central_meridian(39), 117.0);
/// ```
#[inline]
pub const fn central_meridian(zone: i32) -> f64 {
    zone as f64 * 3.0
}

/// Represents a planar point of a CGCS2000 3-degree zone.
///
/// `zone` is required to invert the point,
/// zones share the same range of `easting` and `northing`.
///
/// # Example
///
/// ```
/// # use chncrs::*;
/// #
/// let p = wgs84_to_cgcs2000_3deg(116.4, 39.9);
/// assert_eq!(p.zone, 39);
///
/// let (easting, northing, zone) = p.into();
/// assert_eq!(zone, 39);
/// assert!((easting - 448688.856).abs() < 1e-3);
/// assert!((northing - 4418598.001).abs() < 1e-3);
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Projected {
    /// The easting \[m\], false easting included
    pub easting: f64,
    /// The northing \[m\]
    pub northing: f64,
    /// The 3-degree zone number
    pub zone: i32,
}

impl Projected {
    /// Makes a [`Projected`].
    #[inline]
    pub const fn new(easting: f64, northing: f64, zone: i32) -> Self {
        Self {
            easting,
            northing,
            zone,
        }
    }

    /// Returns the easting with the zone-million prefix, `zone` × 1,000,000 + `easting`.
    ///
    /// # Example
    ///
    /// ```
    /// # use chncrs::*;
    /// #
    /// let p = Projected::new(448688.5, 4418598.0, 39);
    /// assert_eq!(p.zone_million_easting(), 39448688.5);
    /// ```
    #[inline]
    pub fn zone_million_easting(&self) -> f64 {
        mul_add!(self.zone as f64, ZONE_MILLION, self.easting)
    }
}

impl From<Projected> for (f64, f64, i32) {
    #[inline]
    fn from(value: Projected) -> Self {
        (value.easting, value.northing, value.zone)
    }
}

/// The Gauss-Kruger (Transverse Mercator) projection of a single zone.
///
/// # Example
///
/// ```
/// # use chncrs::projection::*;
/// #
/// let gk = GaussKruger::zone_3deg(38);
///
/// let (x, y) = gk.forward(114.0, 30.0);
/// assert_eq!(x, 500000.0);
/// assert!((y - 3320113.398).abs() < 1e-3);
///
/// let (lon, lat) = gk.inverse(x, y);
/// assert!((lon - 114.0).abs() < 1e-9);
/// assert!((lat - 30.0).abs() < 1e-9);
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct GaussKruger {
    ellipsoid: Ellipsoid,
    /// The central meridian \[deg\]
    lon0: f64,
    k0: f64,
    false_easting: f64,
    false_northing: f64,
    /// 𝑘₀ 𝐴, the rectifying radius scaled
    k0_a: f64,
    alpha: [f64; 6],
    beta: [f64; 6],
}

impl GaussKruger {
    /// Makes a [`GaussKruger`] with the latitude of origin on the equator.
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let n = ellipsoid.n();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let a = ellipsoid.a / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0);

        #[rustfmt::skip]
        let alpha = [
            n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3 + 41.0 / 180.0 * n4
                - 127.0 / 288.0 * n5 + 7891.0 / 37800.0 * n6,
            13.0 / 48.0 * n2 - 3.0 / 5.0 * n3 + 557.0 / 1440.0 * n4 + 281.0 / 630.0 * n5
                - 1983433.0 / 1935360.0 * n6,
            61.0 / 240.0 * n3 - 103.0 / 140.0 * n4 + 15061.0 / 26880.0 * n5
                + 167603.0 / 181440.0 * n6,
            49561.0 / 161280.0 * n4 - 179.0 / 168.0 * n5 + 6601661.0 / 7257600.0 * n6,
            34729.0 / 80640.0 * n5 - 3418889.0 / 1995840.0 * n6,
            212378941.0 / 319334400.0 * n6,
        ];

        #[rustfmt::skip]
        let beta = [
            n / 2.0 - 2.0 / 3.0 * n2 + 37.0 / 96.0 * n3 - 1.0 / 360.0 * n4
                - 81.0 / 512.0 * n5 + 96199.0 / 604800.0 * n6,
            1.0 / 48.0 * n2 + 1.0 / 15.0 * n3 - 437.0 / 1440.0 * n4 + 46.0 / 105.0 * n5
                - 1118711.0 / 3870720.0 * n6,
            17.0 / 480.0 * n3 - 37.0 / 840.0 * n4 - 209.0 / 4480.0 * n5
                + 5569.0 / 90720.0 * n6,
            4397.0 / 161280.0 * n4 - 11.0 / 504.0 * n5 - 830251.0 / 7257600.0 * n6,
            4583.0 / 161280.0 * n5 - 108847.0 / 3991680.0 * n6,
            20648693.0 / 638668800.0 * n6,
        ];

        Self {
            ellipsoid,
            lon0,
            k0,
            false_easting,
            false_northing,
            k0_a: k0 * a,
            alpha,
            beta,
        }
    }

    /// Makes a [`GaussKruger`] of the CGCS2000 3-degree `zone`.
    ///
    /// The scale factor is 1.0, the false easting 500,000 \[m\]
    /// and the false northing 0.
    #[inline]
    pub fn zone_3deg(zone: i32) -> Self {
        Self::new(CGCS2000, central_meridian(zone), 1.0, FALSE_EASTING, 0.0)
    }

    /// Returns the central meridian \[deg\].
    #[inline]
    pub const fn lon0(&self) -> f64 {
        self.lon0
    }

    /// Returns the scale factor on the central meridian.
    #[inline]
    pub const fn k0(&self) -> f64 {
        self.k0
    }

    /// Returns conformal tangent τ′ of geodetic tangent τ.
    #[inline]
    fn conformal(&self, tau: f64) -> f64 {
        let e = self.ellipsoid.e();
        let tau1 = tau.hypot(1.0);
        let sigma = (e * (e * tau / tau1).atanh()).sinh();
        tau * sigma.hypot(1.0) - sigma * tau1
    }

    /// Returns geodetic tangent τ of conformal tangent τ′ by Newton's method.
    fn geodetic(&self, tau_prime: f64) -> f64 {
        const ITERATION: usize = 15;

        let e2 = self.ellipsoid.e2();
        let mut tau = tau_prime;

        for _ in 0..ITERATION {
            let tau1 = tau.hypot(1.0);
            let estimated = self.conformal(tau);
            let dtau = (tau_prime - estimated) * mul_add!(1.0 - e2, tau * tau, 1.0)
                / ((1.0 - e2) * tau1 * estimated.hypot(1.0));
            tau += dtau;
            if dtau.abs() < 1e-12 * (1.0 + tau.abs()) {
                break;
            }
        }

        tau
    }

    /// Returns `(easting, northing)` \[m\] of `(lon, lat)` \[deg\].
    pub fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let dlam = (lon - self.lon0).to_radians();
        let (sin_dlam, cos_dlam) = dlam.sin_cos();

        let tau_prime = self.conformal(lat.to_radians().tan());

        let xi_prime = tau_prime.atan2(cos_dlam);
        let eta_prime = (sin_dlam / tau_prime.hypot(cos_dlam)).asinh();

        let mut xi = xi_prime;
        let mut eta = eta_prime;
        for (j, a) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            let (sin, cos) = (k * xi_prime).sin_cos();
            xi = mul_add!(*a, sin * (k * eta_prime).cosh(), xi);
            eta = mul_add!(*a, cos * (k * eta_prime).sinh(), eta);
        }

        (
            mul_add!(self.k0_a, eta, self.false_easting),
            mul_add!(self.k0_a, xi, self.false_northing),
        )
    }

    /// Returns `(lon, lat)` \[deg\] of `(easting, northing)` \[m\].
    pub fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let eta = (easting - self.false_easting) / self.k0_a;
        let xi = (northing - self.false_northing) / self.k0_a;

        let mut xi_prime = xi;
        let mut eta_prime = eta;
        for (j, b) in self.beta.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            let (sin, cos) = (k * xi).sin_cos();
            xi_prime = mul_add!(-*b, sin * (k * eta).cosh(), xi_prime);
            eta_prime = mul_add!(-*b, cos * (k * eta).sinh(), eta_prime);
        }

        let sinh_eta = eta_prime.sinh();
        let (sin_xi, cos_xi) = xi_prime.sin_cos();
        let tau_prime = sin_xi / sinh_eta.hypot(cos_xi);

        let lat = self.geodetic(tau_prime).atan().to_degrees();
        let lon = self.lon0 + sinh_eta.atan2(cos_xi).to_degrees();

        (lon, lat)
    }
}

/// Returns the CGCS2000 3-degree zone position of the WGS84 `(lon, lat)`.
///
/// The zone is [`lon_to_3deg_zone`] of `lon`,
/// and the easting carries no zone-million prefix,
/// see [`Projected::zone_million_easting`].
///
/// # Example
///
/// ```
/// # use chncrs::*;
/// #
/// let p = wgs84_to_cgcs2000_3deg(114.0, 30.0);
/// assert_eq!(p.zone, 38);
/// assert_eq!(p.easting, 500000.0);
/// assert!((p.northing - 3320113.398).abs() < 1e-3);
/// ```
pub fn wgs84_to_cgcs2000_3deg(lon: f64, lat: f64) -> Projected {
    let zone = lon_to_3deg_zone(lon);
    let (easting, northing) = GaussKruger::zone_3deg(zone).forward(lon, lat);
    Projected::new(easting, northing, zone)
}

/// Returns the WGS84 position of the CGCS2000 3-degree zone `(x, y)`.
///
/// If `has_zone_million` is `true`, `zone` × 1,000,000 is subtracted from `x`
/// before inversion.
/// The zone is not validated against `x`, an inconsistent one gives
/// a position in the wrong zone.
///
/// # Example
///
/// ```
/// # use chncrs::*;
/// #
/// let (lon, lat) = cgcs2000_3deg_to_wgs84(500000.0, 3320113.3978450214, 38, false);
/// assert!((lon - 114.0).abs() < 1e-9);
/// assert!((lat - 30.0).abs() < 1e-9);
///
/// let (lon, lat) = cgcs2000_3deg_to_wgs84(38500000.0, 3320113.3978450214, 38, true);
/// assert!((lon - 114.0).abs() < 1e-9);
/// assert!((lat - 30.0).abs() < 1e-9);
/// ```
pub fn cgcs2000_3deg_to_wgs84(x: f64, y: f64, zone: i32, has_zone_million: bool) -> (f64, f64) {
    let x = if has_zone_million {
        mul_add!(-(zone as f64), ZONE_MILLION, x)
    } else {
        x
    };
    GaussKruger::zone_3deg(zone).inverse(x, y)
}
