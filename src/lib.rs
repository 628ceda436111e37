//! # chncrs
//!
//! Offline coordinate conversion between the coordinate reference systems
//! in use in mainland China.
//!
//! ```
//! use chncrs::{Converter, Coordinate, Crs, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let converter = Converter::new();
//!
//!     // Makes the origin of conversion, Tiananmen in BD09
//!     let origin = Coordinate::new(116.404, 39.915, Crs::BD09);
//!
//!     // Converts to WGS84 via GCJ02
//!     let result = converter.convert(origin, Crs::WGS84);
//!     // Prints Geographic(Coordinate { longitude: 116.39..., latitude: 39.90..., crs: WGS84 })
//!     println!("{result:?}");
//!
//!     // Converts to the CGCS2000 3-degree zone grid
//!     let result = converter.convert(origin, Crs::CGCS2000);
//!     let projected = result.projected().copied();
//!     // Prints Some(Projected { easting: 4480..., northing: 44178..., zone: 39 })
//!     println!("{projected:?}");
//!
//!     // Converts to MapBar, failing if the iterative inverse does not converge
//!     let origin = Coordinate::new(116.4, 39.9, Crs::WGS84);
//!     let result = converter.try_convert(origin, Crs::MapBar)?;
//!     println!("{result:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! Features:
//!
//! - Supports [WGS84], [GCJ02], [BD09], MapBar and [CGCS2000] 3-degree Gauss-Kruger zones
//! - Supports conversion between every pair, composed through WGS84
//! - Supports the inverse of MapBar by fixed-point iteration with a configurable budget
//! - Supports the zone-million easting prefix of the Chinese zone grid
//! - Pure and stateless, no web API
//! - Depends on [`log`][log] only,
//!   and on [`serde`][serde] only if `serde` feature on
//!
//! [WGS84]: https://epsg.io/4326
//! [GCJ02]: https://en.wikipedia.org/wiki/Restrictions_on_geographic_data_in_China
//! [BD09]: https://en.wikipedia.org/wiki/Restrictions_on_geographic_data_in_China#BD-09
//! [CGCS2000]: https://epsg.io/4490
//!
//! [log]: https://crates.io/crates/log
//! [serde]: https://crates.io/crates/serde
//!
//! The GCJ02 and BD09 offsets are empirical, they are meaningful
//! only in mainland China. Positions outside of it are computed through
//! without rejection.
//!
//! # Elementary Transforms
//!
//! The conversions are compositions of the elementary transforms
//! in [`transform`] and [`solver`], and of the zone projection in [`projection`].
//! [`route`] shows the composition of each pair.
//!
//! ```
//! use chncrs::*;
//!
//! // MapBar to BD09 is MapBar -> WGS84 -> GCJ02 -> BD09
//! let (lng, lat) = mapbar_to_wgs84(116.4, 39.9);
//! let (lng, lat) = wgs84_to_gcj02(lng, lat);
//! let (lng, lat) = gcj02_to_bd09(lng, lat);
//! assert_eq!(mapbar_to_bd09(116.4, 39.9), (lng, lat));
//!
//! assert_eq!(
//!     route(Crs::MapBar, Crs::BD09),
//!     &[Hop::MapBarToWgs84, Hop::Wgs84ToGcj02, Hop::Gcj02ToBd09]
//! );
//! ```
//!
//! # Serialization and Deserialization
//!
//! It supports (de)serialization by [`serde` crate](https://crates.io/crates/serde)
//! for [`Crs`], [`Coordinate`], [`Position`], [`Projected`], [`Hop`],
//! [`SolverConfig`] and [`Solution`] only if the feature `serde` is enabled.
//! We show a (de)serialization example to/from json;
//!
//! ```
//! # #[cfg(feature = "serde")]
//! # fn main() -> serde_json::Result<()> {
//! use chncrs::{Coordinate, Crs};
//!
//! let coord = Coordinate::new(116.404, 39.915, Crs::GCJ02);
//!
//! // Serialize to json
//! let json = serde_json::to_string(&coord)?;
//! assert_eq!(
//!     json,
//!     r#"{"longitude":116.404,"latitude":39.915,"crs":"GCJ02"}"#
//! );
//!
//! // Deserialize from json
//! let result: Coordinate = serde_json::from_str(&json)?;
//! assert_eq!(result, coord);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "serde"))]
//! # fn main() {}
//! ```
//!
//! # Logging
//!
//! It emits records through the [`log`][log] facade,
//! each hop of [`Converter`] and each iteration of the MapBar inverse at `trace`,
//! convergence at `debug` and non-convergence at `warn`.
//! A target off the MapBar grid cannot meet the tolerance,
//! the inverse stalling within the grid step is logged at `debug` instead.
//! No record is emitted unless the application installs a logger.

#[doc(inline)]
pub use convert::*;
#[doc(inline)]
pub use crs::{Coordinate, Crs, Position};
#[doc(inline)]
pub use error::{Error, ErrorKind, Result};
#[doc(inline)]
pub use projection::{
    cgcs2000_3deg_to_wgs84, central_meridian, lon_to_3deg_zone, wgs84_to_cgcs2000_3deg, Projected,
};
#[doc(inline)]
pub use solver::{
    try_wgs84_to_mapbar, wgs84_to_mapbar, wgs84_to_mapbar_with, Solution, SolverConfig,
};
#[doc(inline)]
pub use transform::{bd09_to_gcj02, gcj02_to_bd09, gcj02_to_wgs84, mapbar_to_wgs84, wgs84_to_gcj02};

pub mod convert;
pub mod crs;
pub mod error;
mod internal;
pub mod projection;
pub mod solver;
pub mod transform;
