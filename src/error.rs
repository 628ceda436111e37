//! Provides [`Error`] and [`ErrorKind`].
use std::fmt::{Display, Formatter};

/// Alias for a `Result<T, chncrs::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// An error which can be returned by this crate.
///
/// Conversions themselves are total over `f64`,
/// so this is only returned by the strict solver entry point,
/// by the checked [`SolverConfig`](crate::SolverConfig) constructor
/// and by parsing a [`Crs`](crate::Crs) name.
#[derive(Debug, PartialEq, Clone)]
pub struct Error {
    kind: ErrorKind,
}

/// An error kind used by [`Error`].
#[derive(Debug, PartialEq, Clone)]
pub enum ErrorKind {
    /// Error is still higher than the criteria even though iteration exhausted
    NotConvergent {
        /// Resulting longitude
        longitude: f64,
        /// Resulting latitude
        latitude: f64,
        /// Iterations spent
        iteration: usize,
        /// Error criteria
        criteria: f64,
    },
    /// Solver configuration out of range
    InvalidSolverConfig {
        /// Given iteration budget
        max_iter: usize,
        /// Given tolerance
        tol: f64,
    },
    /// Unknown coordinate reference system name
    UnknownCrs {
        /// Invalid data
        name: String,
    },
}

impl Error {
    #[cold]
    pub(crate) const fn new_not_convergent(
        longitude: f64,
        latitude: f64,
        iteration: usize,
        criteria: f64,
    ) -> Self {
        Self {
            kind: ErrorKind::NotConvergent {
                longitude,
                latitude,
                iteration,
                criteria,
            },
        }
    }

    #[cold]
    pub(crate) const fn new_invalid_solver_config(max_iter: usize, tol: f64) -> Self {
        Self {
            kind: ErrorKind::InvalidSolverConfig { max_iter, tol },
        }
    }

    #[cold]
    pub(crate) fn new_unknown_crs(name: &str) -> Self {
        Self {
            kind: ErrorKind::UnknownCrs {
                name: name.to_string(),
            },
        }
    }

    /// Returns the detailed cause.
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match &self.kind {
            ErrorKind::NotConvergent {
                iteration,
                criteria,
                ..
            } => write!(
                f,
                "error is still higher than {criteria:?} even exhaust {iteration:?} iterations"
            ),
            ErrorKind::InvalidSolverConfig { max_iter, tol } => write!(
                f,
                "invalid solver config: max_iter must be positive and tol finite positive, got {max_iter:?} and {tol:?}"
            ),
            ErrorKind::UnknownCrs { name } => write!(f, "unknown coordinate system: '{name}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::new_not_convergent(116.4, 39.9, 20, 1e-7).to_string(),
            "error is still higher than 1e-7 even exhaust 20 iterations"
        );
        assert_eq!(
            Error::new_invalid_solver_config(0, 1e-7).to_string(),
            "invalid solver config: max_iter must be positive and tol finite positive, got 0 and 1e-7"
        );
        assert_eq!(
            Error::new_unknown_crs("tokyo").to_string(),
            "unknown coordinate system: 'tokyo'"
        );
    }

    #[test]
    fn test_kind() {
        let e = Error::new_invalid_solver_config(5, -1.0);
        assert_eq!(
            e.kind(),
            &ErrorKind::InvalidSolverConfig {
                max_iter: 5,
                tol: -1.0
            }
        );
    }
}
