//! Provides the inverse of the MapBar transform.
//!
//! [`mapbar_to_wgs84`] truncates to integer units at each round,
//! so it has no closed-form inverse.
//! It is inverted here by fixed-point iteration:
//! the forward transform is applied to the current guess
//! and the residual against the target is added back to the guess.
//! No Jacobian is involved.
use log::{debug, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::transform::{mapbar_to_wgs84, MAPBAR_RESOLUTION};
use crate::{Error, Result};

/// The configuration of the MapBar inverse solver.
///
/// # Example
///
/// ```
/// # use chncrs::*;
/// #
/// let config = SolverConfig::default();
/// assert_eq!(config.max_iter, 20);
/// assert_eq!(config.tol, 1e-7);
///
/// let config = SolverConfig::try_new(50, 1e-9)?;
/// assert_eq!(config, SolverConfig::new(50, 1e-9));
///
/// assert!(SolverConfig::try_new(0, 1e-9).is_err());
/// assert!(SolverConfig::try_new(50, 0.0).is_err());
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// The maximum count of forward transform evaluations
    pub max_iter: usize,
    /// The convergence criteria on both components \[deg\]
    pub tol: f64,
}

impl SolverConfig {
    /// The default of [`SolverConfig::max_iter`].
    pub const DEFAULT_MAX_ITER: usize = 20;
    /// The default of [`SolverConfig::tol`].
    pub const DEFAULT_TOL: f64 = 1e-7;

    /// Makes a [`SolverConfig`].
    ///
    /// This does not check the values,
    /// `max_iter` of 0 makes the solver return the target as is.
    #[inline]
    pub const fn new(max_iter: usize, tol: f64) -> Self {
        Self { max_iter, tol }
    }

    /// Makes a [`SolverConfig`] with checking.
    ///
    /// # Errors
    ///
    /// If `max_iter` is 0, or `tol` is not a finite positive number.
    pub fn try_new(max_iter: usize, tol: f64) -> Result<Self> {
        if max_iter == 0 || !tol.is_finite() || tol.le(&0.0) {
            return Err(Error::new_invalid_solver_config(max_iter, tol));
        }
        Ok(Self::new(max_iter, tol))
    }
}

impl Default for SolverConfig {
    #[inline]
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ITER, Self::DEFAULT_TOL)
    }
}

/// The result of the MapBar inverse solver.
///
/// The estimate is returned even when the iteration does not converge,
/// check [`converged`](Solution::converged).
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// The estimated MapBar longitude \[deg\]
    pub longitude: f64,
    /// The estimated MapBar latitude \[deg\]
    pub latitude: f64,
    /// The count of forward transform evaluations
    pub iterations: usize,
    /// The last measured `(longitude, latitude)` residual \[deg\],
    /// NaN when no evaluation happened
    pub residual: (f64, f64),
    /// Whether both residual components fell below the tolerance
    pub converged: bool,
}

impl Solution {
    /// Returns the estimate if converged.
    ///
    /// # Errors
    ///
    /// If the iteration did not converge within `config`.
    pub fn into_result(self, config: &SolverConfig) -> Result<(f64, f64)> {
        if self.converged {
            Ok((self.longitude, self.latitude))
        } else {
            Err(Error::new_not_convergent(
                self.longitude,
                self.latitude,
                self.iterations,
                config.tol,
            ))
        }
    }
}

impl From<Solution> for (f64, f64) {
    #[inline]
    fn from(value: Solution) -> Self {
        (value.longitude, value.latitude)
    }
}

/// Returns the MapBar position of the WGS84 `(lng, lat)` with the default config.
///
/// This returns the last estimate silently if the iteration does not converge,
/// use [`wgs84_to_mapbar_with`] or [`try_wgs84_to_mapbar`] to know it.
///
/// # Example
///
/// ```
/// # use chncrs::*;
/// #
/// let (lng, lat) = wgs84_to_mapbar(116.4, 39.9);
/// assert_eq!(mapbar_to_wgs84(lng, lat), (116.4, 39.9));
/// ```
#[inline]
pub fn wgs84_to_mapbar(lng: f64, lat: f64) -> (f64, f64) {
    wgs84_to_mapbar_with(lng, lat, &SolverConfig::default()).into()
}

/// Returns the [`Solution`] of the MapBar position of the WGS84 `(lng, lat)`.
///
/// The initial guess is `(lng, lat)` itself.
/// This evaluates [`mapbar_to_wgs84`] at most `config.max_iter` times.
///
/// # Example
///
/// ```
/// # use chncrs::*;
/// #
/// let config = SolverConfig::default();
/// let solution = wgs84_to_mapbar_with(116.4, 39.9, &config);
///
/// assert!(solution.converged);
/// assert!(solution.iterations < config.max_iter);
/// assert!(solution.residual.0.abs() <= config.tol);
/// assert!(solution.residual.1.abs() <= config.tol);
/// ```
pub fn wgs84_to_mapbar_with(lng: f64, lat: f64, config: &SolverConfig) -> Solution {
    let (mut x, mut y) = (lng, lat);
    let mut residual = (f64::NAN, f64::NAN);

    for i in 1..=config.max_iter {
        let (fx, fy) = mapbar_to_wgs84(x, y);

        let (dx, dy) = (lng - fx, lat - fy);
        x += dx;
        y += dy;
        residual = (dx, dy);

        trace!("mapbar inverse #{i}: guess ({x}, {y}), residual ({dx:e}, {dy:e})");

        if dx.abs().lt(&config.tol) && dy.abs().lt(&config.tol) {
            debug!("mapbar inverse of ({lng}, {lat}) converged in {i} iterations");
            return Solution {
                longitude: x,
                latitude: y,
                iterations: i,
                residual,
                converged: true,
            };
        }
    }

    if residual.0.abs().le(&MAPBAR_RESOLUTION) && residual.1.abs().le(&MAPBAR_RESOLUTION) {
        // a target off the MapBar grid is reachable only up to the resolution
        debug!(
            "mapbar inverse of ({lng}, {lat}) stalled at resolution, residual ({:e}, {:e})",
            residual.0, residual.1
        );
    } else {
        warn!(
            "mapbar inverse of ({lng}, {lat}) not converged in {} iterations, residual ({:e}, {:e})",
            config.max_iter, residual.0, residual.1
        );
    }

    Solution {
        longitude: x,
        latitude: y,
        iterations: config.max_iter,
        residual,
        converged: false,
    }
}

/// Returns the MapBar position of the WGS84 `(lng, lat)` only if converged.
///
/// # Errors
///
/// If the residual is still higher than `config.tol`
/// after `config.max_iter` iterations.
///
/// # Example
///
/// ```
/// # use chncrs::*;
/// #
/// let (lng, lat) = try_wgs84_to_mapbar(116.4, 39.9, &SolverConfig::default())?;
/// assert_eq!(mapbar_to_wgs84(lng, lat), (116.4, 39.9));
///
/// // a single evaluation is not enough
/// let r = try_wgs84_to_mapbar(116.4, 39.9, &SolverConfig::new(1, 1e-7));
/// assert!(r.is_err());
/// # Ok::<(), Error>(())
/// ```
#[inline]
pub fn try_wgs84_to_mapbar(lng: f64, lat: f64, config: &SolverConfig) -> Result<(f64, f64)> {
    wgs84_to_mapbar_with(lng, lat, config).into_result(config)
}
