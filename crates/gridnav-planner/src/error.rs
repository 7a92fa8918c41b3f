//! This module defines the error types used by the `gridnav-planner` crate.

#![warn(missing_docs)]

use thiserror::Error;

use crate::map::GridIndex;

/// Broad category of a [`PlannerError`].
///
/// Callers that only need to know *how* to react (reject the input, fix a
/// zero resolution, or treat the planner as corrupted) can match on this
/// instead of on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input at the point of the call: empty obstacles, non-finite values,
    /// invalid parameters.
    Validation,
    /// A conversion was asked to divide by a zero resolution.
    ArithmeticDomain,
    /// An internal invariant of the search was broken. Never recoverable.
    ContractViolation,
}

/// Error type for planner construction, coordinate conversion and path reconstruction.
///
/// The absence of a path is *not* an error: planning returns an empty result instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// Returned when the obstacle lists are empty, so grid bounds cannot be derived.
    #[error("Invalid obstacle input: obstacle lists are empty, grid bounds cannot be derived")]
    EmptyObstacles,
    /// Returned when the obstacle x and y lists differ in length.
    #[error("Invalid obstacle input: {x_len} x coordinates but {y_len} y coordinates")]
    MismatchedObstacles {
        /// Number of x coordinates supplied.
        x_len: usize,
        /// Number of y coordinates supplied.
        y_len: usize,
    },
    /// Returned when a coordinate, bound or parameter is NaN or infinite.
    #[error("Invalid numeric input: {0} must be a finite number")]
    NonFinite(&'static str),
    /// Returned when a planner is built with a resolution that is not positive.
    #[error("Invalid map resolution: {0} (must be positive)")]
    InvalidResolution(f64),
    /// Returned when a planner is built with a negative robot radius.
    #[error("Invalid robot radius: {0} (must not be negative)")]
    InvalidRobotRadius(f64),
    /// Returned when a motion model yields a move that would break the search.
    #[error("Invalid motion model: {0}")]
    InvalidMotion(&'static str),
    /// Returned when a world coordinate maps to a grid index beyond the `i64` range.
    #[error("Grid index out of range: {0} does not fit in a 64-bit index")]
    IndexOverflow(f64),
    /// Returned when the derived grid would not fit in memory.
    #[error("Invalid map dimensions: {x_width}x{y_width} cells would overflow")]
    GridTooLarge {
        /// Derived number of cells along x.
        x_width: i64,
        /// Derived number of cells along y.
        y_width: i64,
    },
    /// Returned when accessing an obstacle map cell outside the grid.
    #[error("Map access out of bounds: cell ({x}, {y})")]
    OutOfBounds {
        /// Grid x coordinate.
        x: i64,
        /// Grid y coordinate.
        y: i64,
    },
    /// Returned when a world/grid conversion is asked to use a zero resolution.
    #[error("Division by zero: resolution is 0")]
    DivisionByZero,
    /// Returned when path reconstruction follows a parent link absent from the visited set.
    #[error("Corrupted visited set: parent index {index} not found")]
    MissingParent {
        /// The grid index that was looked up.
        index: GridIndex,
    },
    /// Returned when parent links loop back on themselves during path reconstruction.
    #[error("Corrupted visited set: parent links form a cycle at index {index}")]
    ParentCycle {
        /// The grid index at which the walk gave up.
        index: GridIndex,
    },
}

impl PlannerError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlannerError::DivisionByZero => ErrorKind::ArithmeticDomain,
            PlannerError::MissingParent { .. } | PlannerError::ParentCycle { .. } => {
                ErrorKind::ContractViolation
            }
            PlannerError::EmptyObstacles
            | PlannerError::MismatchedObstacles { .. }
            | PlannerError::NonFinite(_)
            | PlannerError::InvalidResolution(_)
            | PlannerError::InvalidRobotRadius(_)
            | PlannerError::InvalidMotion(_)
            | PlannerError::IndexOverflow(_)
            | PlannerError::GridTooLarge { .. }
            | PlannerError::OutOfBounds { .. } => ErrorKind::Validation,
        }
    }
}
