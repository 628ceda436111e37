//! Provides conversions between every pair of systems.
//!
//! Each conversion is the plain composition of the elementary transforms
//! through WGS84, in the order listed by [`route`].
//! Nothing is corrected at the boundaries between hops,
//! so the error of each hop accumulates.
use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::crs::{Coordinate, Crs, Position};
use crate::projection::{
    cgcs2000_3deg_to_wgs84, lon_to_3deg_zone, wgs84_to_cgcs2000_3deg, Projected,
};
use crate::solver::{wgs84_to_mapbar, wgs84_to_mapbar_with, Solution, SolverConfig};
use crate::transform::{
    bd09_to_gcj02, gcj02_to_bd09, gcj02_to_wgs84, mapbar_to_wgs84, wgs84_to_gcj02,
};
use crate::Result;

/// Returns the WGS84 position of the BD09 `(lng, lat)`, via GCJ02.
#[inline]
pub fn bd09_to_wgs84(lng: f64, lat: f64) -> (f64, f64) {
    let (lng, lat) = bd09_to_gcj02(lng, lat);
    gcj02_to_wgs84(lng, lat)
}

/// Returns the BD09 position of the WGS84 `(lng, lat)`, via GCJ02.
#[inline]
pub fn wgs84_to_bd09(lng: f64, lat: f64) -> (f64, f64) {
    let (lng, lat) = wgs84_to_gcj02(lng, lat);
    gcj02_to_bd09(lng, lat)
}

/// Returns the GCJ02 position of the MapBar `(lng, lat)`, via WGS84.
#[inline]
pub fn mapbar_to_gcj02(lng: f64, lat: f64) -> (f64, f64) {
    let (lng, lat) = mapbar_to_wgs84(lng, lat);
    wgs84_to_gcj02(lng, lat)
}

/// Returns the MapBar position of the GCJ02 `(lng, lat)`, via WGS84.
///
/// The MapBar inverse uses the default [`SolverConfig`].
#[inline]
pub fn gcj02_to_mapbar(lng: f64, lat: f64) -> (f64, f64) {
    let (lng, lat) = gcj02_to_wgs84(lng, lat);
    wgs84_to_mapbar(lng, lat)
}

/// See [`gcj02_to_mapbar`], with an explicit `config`.
#[inline]
pub fn gcj02_to_mapbar_with(lng: f64, lat: f64, config: &SolverConfig) -> Solution {
    let (lng, lat) = gcj02_to_wgs84(lng, lat);
    wgs84_to_mapbar_with(lng, lat, config)
}

/// Returns the BD09 position of the MapBar `(lng, lat)`, via WGS84 and GCJ02.
///
/// # Example
///
/// ```
/// # use chncrs::*;
/// #
/// let (lng, lat) = mapbar_to_wgs84(116.4, 39.9);
/// assert_eq!(mapbar_to_bd09(116.4, 39.9), wgs84_to_bd09(lng, lat));
/// ```
#[inline]
pub fn mapbar_to_bd09(lng: f64, lat: f64) -> (f64, f64) {
    let (lng, lat) = mapbar_to_wgs84(lng, lat);
    wgs84_to_bd09(lng, lat)
}

/// Returns the MapBar position of the BD09 `(lng, lat)`, via GCJ02 and WGS84.
#[inline]
pub fn bd09_to_mapbar(lng: f64, lat: f64) -> (f64, f64) {
    let (lng, lat) = bd09_to_wgs84(lng, lat);
    wgs84_to_mapbar(lng, lat)
}

/// See [`bd09_to_mapbar`], with an explicit `config`.
#[inline]
pub fn bd09_to_mapbar_with(lng: f64, lat: f64, config: &SolverConfig) -> Solution {
    let (lng, lat) = bd09_to_wgs84(lng, lat);
    wgs84_to_mapbar_with(lng, lat, config)
}

/// Returns the CGCS2000 3-degree zone position of the GCJ02 `(lon, lat)`, via WGS84.
#[inline]
pub fn gcj02_to_cgcs2000_3deg(lon: f64, lat: f64) -> Projected {
    let (lon, lat) = gcj02_to_wgs84(lon, lat);
    wgs84_to_cgcs2000_3deg(lon, lat)
}

/// Returns the GCJ02 position of the CGCS2000 3-degree zone `(x, y)`, via WGS84.
///
/// See [`cgcs2000_3deg_to_wgs84`] for `zone` and `has_zone_million`.
#[inline]
pub fn cgcs2000_3deg_to_gcj02(x: f64, y: f64, zone: i32, has_zone_million: bool) -> (f64, f64) {
    let (lon, lat) = cgcs2000_3deg_to_wgs84(x, y, zone, has_zone_million);
    wgs84_to_gcj02(lon, lat)
}

/// Returns the CGCS2000 3-degree zone position of the BD09 `(lon, lat)`, via GCJ02 and WGS84.
#[inline]
pub fn bd09_to_cgcs2000_3deg(lon: f64, lat: f64) -> Projected {
    let (lon, lat) = bd09_to_wgs84(lon, lat);
    wgs84_to_cgcs2000_3deg(lon, lat)
}

/// Returns the BD09 position of the CGCS2000 3-degree zone `(x, y)`, via WGS84 and GCJ02.
#[inline]
pub fn cgcs2000_3deg_to_bd09(x: f64, y: f64, zone: i32, has_zone_million: bool) -> (f64, f64) {
    let (lon, lat) = cgcs2000_3deg_to_wgs84(x, y, zone, has_zone_million);
    wgs84_to_bd09(lon, lat)
}

/// Returns the CGCS2000 3-degree zone position of the MapBar `(lon, lat)`, via WGS84.
#[inline]
pub fn mapbar_to_cgcs2000_3deg(lon: f64, lat: f64) -> Projected {
    let (lon, lat) = mapbar_to_wgs84(lon, lat);
    wgs84_to_cgcs2000_3deg(lon, lat)
}

/// Returns the MapBar position of the CGCS2000 3-degree zone `(x, y)`, via WGS84.
#[inline]
pub fn cgcs2000_3deg_to_mapbar(x: f64, y: f64, zone: i32, has_zone_million: bool) -> (f64, f64) {
    let (lon, lat) = cgcs2000_3deg_to_wgs84(x, y, zone, has_zone_million);
    wgs84_to_mapbar(lon, lat)
}

/// See [`cgcs2000_3deg_to_mapbar`], with an explicit `config`.
#[inline]
pub fn cgcs2000_3deg_to_mapbar_with(
    x: f64,
    y: f64,
    zone: i32,
    has_zone_million: bool,
    config: &SolverConfig,
) -> Solution {
    let (lon, lat) = cgcs2000_3deg_to_wgs84(x, y, zone, has_zone_million);
    wgs84_to_mapbar_with(lon, lat, config)
}

/// An elementary transform, an edge of the conversion graph.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Hop {
    /// [`bd09_to_gcj02`]
    Bd09ToGcj02,
    /// [`gcj02_to_bd09`]
    Gcj02ToBd09,
    /// [`gcj02_to_wgs84`]
    Gcj02ToWgs84,
    /// [`wgs84_to_gcj02`]
    Wgs84ToGcj02,
    /// [`mapbar_to_wgs84`]
    MapBarToWgs84,
    /// [`wgs84_to_mapbar_with`], by the iterative solver
    Wgs84ToMapBar,
    /// [`wgs84_to_cgcs2000_3deg`], the zone projection
    Wgs84ToCgcs2000,
    /// [`cgcs2000_3deg_to_wgs84`], the zone inverse projection
    Cgcs2000ToWgs84,
}

impl Hop {
    /// Returns the system the hop starts from.
    pub const fn source(&self) -> Crs {
        match self {
            Self::Bd09ToGcj02 => Crs::BD09,
            Self::Gcj02ToBd09 | Self::Gcj02ToWgs84 => Crs::GCJ02,
            Self::MapBarToWgs84 => Crs::MapBar,
            Self::Wgs84ToGcj02 | Self::Wgs84ToMapBar | Self::Wgs84ToCgcs2000 => Crs::WGS84,
            Self::Cgcs2000ToWgs84 => Crs::CGCS2000,
        }
    }

    /// Returns the system the hop ends at.
    pub const fn target(&self) -> Crs {
        match self {
            Self::Gcj02ToBd09 => Crs::BD09,
            Self::Bd09ToGcj02 | Self::Wgs84ToGcj02 => Crs::GCJ02,
            Self::Wgs84ToMapBar => Crs::MapBar,
            Self::Gcj02ToWgs84 | Self::MapBarToWgs84 | Self::Cgcs2000ToWgs84 => Crs::WGS84,
            Self::Wgs84ToCgcs2000 => Crs::CGCS2000,
        }
    }
}

/// Returns the chain of hops converting `from` into `to`.
///
/// The table is fixed, every chain passes through WGS84
/// unless the systems are adjacent.
/// It is empty when `from` equals to `to`.
///
/// # Example
///
/// ```
/// # use chncrs::*;
/// #
/// assert_eq!(
///     route(Crs::MapBar, Crs::BD09),
///     &[Hop::MapBarToWgs84, Hop::Wgs84ToGcj02, Hop::Gcj02ToBd09]
/// );
/// assert_eq!(route(Crs::BD09, Crs::GCJ02), &[Hop::Bd09ToGcj02]);
/// assert!(route(Crs::WGS84, Crs::WGS84).is_empty());
/// ```
pub const fn route(from: Crs, to: Crs) -> &'static [Hop] {
    use Crs::*;
    use Hop::*;

    match (from, to) {
        (WGS84, WGS84)
        | (GCJ02, GCJ02)
        | (BD09, BD09)
        | (MapBar, MapBar)
        | (CGCS2000, CGCS2000) => &[],

        (WGS84, GCJ02) => &[Wgs84ToGcj02],
        (WGS84, BD09) => &[Wgs84ToGcj02, Gcj02ToBd09],
        (WGS84, MapBar) => &[Wgs84ToMapBar],
        (WGS84, CGCS2000) => &[Wgs84ToCgcs2000],

        (GCJ02, WGS84) => &[Gcj02ToWgs84],
        (GCJ02, BD09) => &[Gcj02ToBd09],
        (GCJ02, MapBar) => &[Gcj02ToWgs84, Wgs84ToMapBar],
        (GCJ02, CGCS2000) => &[Gcj02ToWgs84, Wgs84ToCgcs2000],

        (BD09, WGS84) => &[Bd09ToGcj02, Gcj02ToWgs84],
        (BD09, GCJ02) => &[Bd09ToGcj02],
        (BD09, MapBar) => &[Bd09ToGcj02, Gcj02ToWgs84, Wgs84ToMapBar],
        (BD09, CGCS2000) => &[Bd09ToGcj02, Gcj02ToWgs84, Wgs84ToCgcs2000],

        (MapBar, WGS84) => &[MapBarToWgs84],
        (MapBar, GCJ02) => &[MapBarToWgs84, Wgs84ToGcj02],
        (MapBar, BD09) => &[MapBarToWgs84, Wgs84ToGcj02, Gcj02ToBd09],
        (MapBar, CGCS2000) => &[MapBarToWgs84, Wgs84ToCgcs2000],

        (CGCS2000, WGS84) => &[Cgcs2000ToWgs84],
        (CGCS2000, GCJ02) => &[Cgcs2000ToWgs84, Wgs84ToGcj02],
        (CGCS2000, BD09) => &[Cgcs2000ToWgs84, Wgs84ToGcj02, Gcj02ToBd09],
        (CGCS2000, MapBar) => &[Cgcs2000ToWgs84, Wgs84ToMapBar],
    }
}

/// The intermediate value between hops,
/// `zone` and `has_zone_million` are meaningful only while planar.
#[derive(Debug, Clone, Copy)]
struct State {
    x: f64,
    y: f64,
    zone: i32,
    has_zone_million: bool,
}

/// The converter between any pair of systems.
///
/// It carries the configuration of the conversions,
/// the [`SolverConfig`] for the MapBar inverse
/// and whether the planar easting carries the zone-million prefix.
/// When the prefix is on, it is removed from the input [`Projected`]
/// and added to the output [`Projected`].
///
/// A geographic [`Coordinate`] tagged [`Crs::CGCS2000`]
/// enters the conversion as WGS84, the two coincide at the precision used.
///
/// # Example
///
/// ```
/// # use chncrs::*;
/// #
/// let converter = Converter::new()
///     .solver(SolverConfig::try_new(30, 1e-8)?)
///     .zone_million(true);
///
/// let origin = Coordinate::new(116.404, 39.915, Crs::BD09);
/// let result = converter.convert(origin, Crs::CGCS2000);
///
/// let projected = result.projected().unwrap();
/// assert_eq!(projected.zone, 39);
/// assert!(projected.easting > 39_000_000.0);
///
/// // same as the composition of free functions
/// let p = bd09_to_cgcs2000_3deg(116.404, 39.915);
/// assert_eq!(projected.easting, p.zone_million_easting());
/// assert_eq!(projected.northing, p.northing);
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Converter {
    solver: SolverConfig,
    zone_million: bool,
}

impl Converter {
    /// Makes a [`Converter`] with the default [`SolverConfig`] and no zone-million prefix.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration of the MapBar inverse.
    #[inline]
    pub fn solver(mut self, config: SolverConfig) -> Self {
        self.solver = config;
        self
    }

    /// Sets whether the planar easting carries the zone-million prefix.
    #[inline]
    pub fn zone_million(mut self, flag: bool) -> Self {
        self.zone_million = flag;
        self
    }

    /// Returns the configuration of the MapBar inverse.
    #[inline]
    pub const fn solver_config(&self) -> &SolverConfig {
        &self.solver
    }

    /// Returns whether the planar easting carries the zone-million prefix.
    #[inline]
    pub const fn has_zone_million(&self) -> bool {
        self.zone_million
    }

    /// Returns `position` converted into `to`.
    ///
    /// The result is [`Position::Projected`] if `to` is [`Crs::CGCS2000`],
    /// otherwise [`Position::Geographic`].
    ///
    /// The MapBar inverse returns its last estimate
    /// if it does not converge, see [`Converter::try_convert`].
    #[inline]
    pub fn convert(&self, position: impl Into<Position>, to: Crs) -> Position {
        let (from, state) = self.enter(position.into());
        let state = route(from, to)
            .iter()
            .fold(state, |state, hop| self.step(hop, state).0);
        self.leave(state, to)
    }

    /// Returns `position` converted into `to`, failing on non-convergence.
    ///
    /// # Errors
    ///
    /// If the MapBar inverse does not converge within the [`SolverConfig`].
    ///
    /// # Example
    ///
    /// ```
    /// # use chncrs::*;
    /// #
    /// let converter = Converter::new();
    /// let origin = Coordinate::new(116.4, 39.9, Crs::WGS84);
    ///
    /// let result = converter.try_convert(origin, Crs::MapBar)?;
    /// assert_eq!(result, converter.convert(origin, Crs::MapBar));
    ///
    /// let strict = Converter::new().solver(SolverConfig::new(1, 1e-7));
    /// assert!(strict.try_convert(origin, Crs::MapBar).is_err());
    /// # Ok::<(), Error>(())
    /// ```
    pub fn try_convert(&self, position: impl Into<Position>, to: Crs) -> Result<Position> {
        let (from, mut state) = self.enter(position.into());
        for hop in route(from, to) {
            let (next, solution) = self.step(hop, state);
            if let Some(solution) = solution {
                solution.into_result(&self.solver)?;
            }
            state = next;
        }
        Ok(self.leave(state, to))
    }

    fn enter(&self, position: Position) -> (Crs, State) {
        match position {
            Position::Geographic(coord) => {
                let from = match coord.crs {
                    Crs::CGCS2000 => Crs::WGS84,
                    crs => crs,
                };
                let state = State {
                    x: coord.longitude,
                    y: coord.latitude,
                    zone: lon_to_3deg_zone(coord.longitude),
                    has_zone_million: false,
                };
                (from, state)
            }
            Position::Projected(proj) => {
                let state = State {
                    x: proj.easting,
                    y: proj.northing,
                    zone: proj.zone,
                    has_zone_million: self.zone_million,
                };
                (Crs::CGCS2000, state)
            }
        }
    }

    fn leave(&self, state: State, to: Crs) -> Position {
        if to.is_projected() {
            let mut proj = Projected::new(state.x, state.y, state.zone);
            if self.zone_million && !state.has_zone_million {
                proj.easting = proj.zone_million_easting();
            }
            Position::Projected(proj)
        } else {
            Position::Geographic(Coordinate::new(state.x, state.y, to))
        }
    }

    /// Applies `hop`, returns the solver outcome if the hop is the MapBar inverse.
    fn step(&self, hop: &Hop, state: State) -> (State, Option<Solution>) {
        trace!("{hop:?}: ({}, {}) zone {}", state.x, state.y, state.zone);

        let geographic = |(x, y): (f64, f64)| State {
            x,
            y,
            zone: state.zone,
            has_zone_million: false,
        };

        match hop {
            Hop::Bd09ToGcj02 => (geographic(bd09_to_gcj02(state.x, state.y)), None),
            Hop::Gcj02ToBd09 => (geographic(gcj02_to_bd09(state.x, state.y)), None),
            Hop::Gcj02ToWgs84 => (geographic(gcj02_to_wgs84(state.x, state.y)), None),
            Hop::Wgs84ToGcj02 => (geographic(wgs84_to_gcj02(state.x, state.y)), None),
            Hop::MapBarToWgs84 => (geographic(mapbar_to_wgs84(state.x, state.y)), None),
            Hop::Wgs84ToMapBar => {
                let solution = wgs84_to_mapbar_with(state.x, state.y, &self.solver);
                (geographic(solution.into()), Some(solution))
            }
            Hop::Wgs84ToCgcs2000 => {
                let proj = wgs84_to_cgcs2000_3deg(state.x, state.y);
                let state = State {
                    x: proj.easting,
                    y: proj.northing,
                    zone: proj.zone,
                    has_zone_million: false,
                };
                (state, None)
            }
            Hop::Cgcs2000ToWgs84 => {
                let lonlat =
                    cgcs2000_3deg_to_wgs84(state.x, state.y, state.zone, state.has_zone_million);
                (geographic(lonlat), None)
            }
        }
    }
}
