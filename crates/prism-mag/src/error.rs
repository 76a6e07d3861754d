//! Error types for the prism forward model

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong before the summation starts.
///
/// All variants are fatal: no partial result is ever returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("coordinates must have exactly 3 rows (easting, northing, vertical), found {found}")]
    CoordinateRank { found: usize },

    #[error("coordinate row {axis} has {found} values, expected {expected}")]
    CoordinateLength {
        axis: usize,
        found: usize,
        expected: usize,
    },

    #[error("prism {index} has {found} columns, expected 6 (west, east, south, north, top, bottom)")]
    PrismColumns { index: usize, found: usize },

    #[error("number of {what} ({found}) does not match the number of prisms ({expected})")]
    CardinalityMismatch {
        what: &'static str,
        found: usize,
        expected: usize,
    },

    #[error("{0}")]
    InvalidPrisms(String),

    #[error("magnetic field component '{0}' not recognized (expected b_x, b_y or b_z)")]
    UnknownField(String),

    #[error("invalid survey: {0}")]
    Survey(String),
}
