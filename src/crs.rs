//! Provides [`Crs`], [`Coordinate`] and [`Position`].
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::projection::Projected;
use crate::Error;

/// Represents the coordinate reference systems supported.
///
/// # Example
///
/// ```
/// # use chncrs::Crs;
/// #
/// assert_eq!("gcj02".parse::<Crs>(), Ok(Crs::GCJ02));
/// assert_eq!(Crs::MapBar.to_string(), "MapBar");
/// assert!(Crs::CGCS2000.is_projected());
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Crs {
    /// The global satellite positioning frame, and the hub of conversions.
    WGS84,
    /// The obfuscated national system of mainland China.
    GCJ02,
    /// The vendor obfuscated system layered on [`Crs::GCJ02`].
    BD09,
    /// The vendor integer-arithmetic obfuscated system.
    MapBar,
    /// CGCS2000.
    ///
    /// As a conversion target, this is the 3-degree Gauss-Kruger zone grid,
    /// see [`Projected`].
    /// As a tag of [`Coordinate`], this is the CGCS2000 geographic coordinate,
    /// which coincides with [`Crs::WGS84`] at the precision used.
    CGCS2000,
}

impl Crs {
    /// All the systems.
    pub const ALL: [Crs; 5] = [
        Crs::WGS84,
        Crs::GCJ02,
        Crs::BD09,
        Crs::MapBar,
        Crs::CGCS2000,
    ];

    /// Returns `true` if the conversion result in `self` is planar.
    #[inline]
    pub const fn is_projected(&self) -> bool {
        matches!(self, Self::CGCS2000)
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::WGS84 => "WGS84",
            Self::GCJ02 => "GCJ02",
            Self::BD09 => "BD09",
            Self::MapBar => "MapBar",
            Self::CGCS2000 => "CGCS2000",
        };
        f.write_str(s)
    }
}

impl FromStr for Crs {
    type Err = Error;

    /// Parses the name case-insensitively,
    /// `cgcs2000_3deg` is accepted as an alias of `cgcs2000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wgs84" => Ok(Self::WGS84),
            "gcj02" => Ok(Self::GCJ02),
            "bd09" => Ok(Self::BD09),
            "mapbar" => Ok(Self::MapBar),
            "cgcs2000" | "cgcs2000_3deg" => Ok(Self::CGCS2000),
            _ => Err(Error::new_unknown_crs(s)),
        }
    }
}

/// Represents a geographic coordinate tagged with its system.
///
/// # Example
///
/// ```
/// # use chncrs::*;
/// #
/// let coord = Coordinate::new(116.404, 39.915, Crs::WGS84);
/// assert_eq!(coord.longitude, 116.404);
/// assert_eq!(coord.latitude, 39.915);
/// assert_eq!(coord.crs, Crs::WGS84);
///
/// let (lng, lat) = coord.into();
/// assert_eq!((lng, lat), (116.404, 39.915));
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    /// The longitude \[deg\]
    pub longitude: f64,
    /// The latitude \[deg\]
    pub latitude: f64,
    /// The system which `longitude` and `latitude` belong to
    pub crs: Crs,
}

impl Coordinate {
    /// Makes a [`Coordinate`].
    ///
    /// This does not check the value range.
    #[inline]
    pub const fn new(longitude: f64, latitude: f64, crs: Crs) -> Self {
        Self {
            longitude,
            latitude,
            crs,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    #[inline]
    fn from(value: Coordinate) -> Self {
        (value.longitude, value.latitude)
    }
}

/// Represents either a geographic or a planar position.
///
/// This is the input and the output of [`Converter`](crate::Converter).
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Position {
    /// A longitude and latitude tagged with its system
    Geographic(Coordinate),
    /// A planar point of the CGCS2000 3-degree zones
    Projected(Projected),
}

impl Position {
    /// Returns the system of `self`.
    ///
    /// # Example
    ///
    /// ```
    /// # use chncrs::*;
    /// #
    /// let p = Position::from(Coordinate::new(116.404, 39.915, Crs::BD09));
    /// assert_eq!(p.crs(), Crs::BD09);
    ///
    /// let p = Position::from(Projected::new(500000.0, 3320113.4, 38));
    /// assert_eq!(p.crs(), Crs::CGCS2000);
    /// ```
    #[inline]
    pub const fn crs(&self) -> Crs {
        match self {
            Self::Geographic(coord) => coord.crs,
            Self::Projected(_) => Crs::CGCS2000,
        }
    }

    /// Returns the geographic coordinate if `self` is.
    #[inline]
    pub const fn geographic(&self) -> Option<&Coordinate> {
        match self {
            Self::Geographic(coord) => Some(coord),
            Self::Projected(_) => None,
        }
    }

    /// Returns the planar coordinate if `self` is.
    #[inline]
    pub const fn projected(&self) -> Option<&Projected> {
        match self {
            Self::Geographic(_) => None,
            Self::Projected(proj) => Some(proj),
        }
    }
}

impl From<Coordinate> for Position {
    #[inline]
    fn from(value: Coordinate) -> Self {
        Self::Geographic(value)
    }
}

impl From<Projected> for Position {
    #[inline]
    fn from(value: Projected) -> Self {
        Self::Projected(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_from_str() {
        for crs in Crs::ALL {
            assert_eq!(crs.to_string().parse::<Crs>(), Ok(crs));
        }

        assert_eq!(" BD09 ".parse::<Crs>(), Ok(Crs::BD09));
        assert_eq!("CGCS2000_3deg".parse::<Crs>(), Ok(Crs::CGCS2000));

        let e = "tokyo".parse::<Crs>().unwrap_err();
        assert_eq!(
            e.kind(),
            &ErrorKind::UnknownCrs {
                name: "tokyo".to_string()
            }
        );
    }

    #[test]
    fn test_is_projected() {
        assert_eq!(Crs::ALL.iter().filter(|c| c.is_projected()).count(), 1);
    }

    #[test]
    fn test_position_accessor() {
        let p = Position::from(Coordinate::new(1.0, 2.0, Crs::GCJ02));
        assert_eq!(p.geographic(), Some(&Coordinate::new(1.0, 2.0, Crs::GCJ02)));
        assert_eq!(p.projected(), None);

        let p = Position::from(Projected::new(1.0, 2.0, 39));
        assert_eq!(p.geographic(), None);
        assert_eq!(p.projected(), Some(&Projected::new(1.0, 2.0, 39)));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serde() {
        use serde_test::{assert_tokens, Token};

        assert_tokens(
            &Crs::GCJ02,
            &[Token::UnitVariant {
                name: "Crs",
                variant: "GCJ02",
            }],
        );
        assert_tokens(
            &Coordinate::new(116.404, 39.915, Crs::WGS84),
            &[
                Token::Struct {
                    name: "Coordinate",
                    len: 3,
                },
                Token::Str("longitude"),
                Token::F64(116.404),
                Token::Str("latitude"),
                Token::F64(39.915),
                Token::Str("crs"),
                Token::UnitVariant {
                    name: "Crs",
                    variant: "WGS84",
                },
                Token::StructEnd,
            ],
        );
    }
}
