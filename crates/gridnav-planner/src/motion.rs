//! Admissible single-step moves on the grid.
//!
//! The planner asks its [`MotionModel`] for the move list once, when it is built,
//! and reuses that list for every expansion. Swapping the model changes path
//! costs and shapes without touching the search loop.

#![warn(missing_docs)]

use std::f64::consts::SQRT_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// A single grid step and its cost.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Motion {
    /// Column offset.
    pub dx: i64,
    /// Row offset.
    pub dy: i64,
    /// Cost of taking the step, in grid units.
    pub cost: f64,
}

impl Motion {
    /// Creates a new `Motion`.
    #[must_use]
    pub const fn new(dx: i64, dy: i64, cost: f64) -> Self {
        Self { dx, dy, cost }
    }

    /// Returns true if the step changes both coordinates.
    pub fn is_diagonal(&self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    /// Checks that the step can be used by the search: it must move, and its
    /// cost must be finite and non-negative so path costs never decrease.
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.dx == 0 && self.dy == 0 {
            return Err(PlannerError::InvalidMotion("motion must move to another cell"));
        }
        if !self.cost.is_finite() {
            return Err(PlannerError::InvalidMotion("motion cost must be finite"));
        }
        if self.cost < 0.0 {
            return Err(PlannerError::InvalidMotion("motion cost must not be negative"));
        }
        Ok(())
    }
}

/// Supplies the ordered list of moves allowed from any cell.
pub trait MotionModel {
    /// Returns the moves, in the order they are tried during expansion.
    fn motions(&self) -> Vec<Motion>;
}

/// The standard 8-connected model: axis moves cost `1`, diagonal moves cost `√2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EightConnected;

impl MotionModel for EightConnected {
    fn motions(&self) -> Vec<Motion> {
        vec![
            Motion::new(1, 0, 1.0),
            Motion::new(0, 1, 1.0),
            Motion::new(-1, 0, 1.0),
            Motion::new(0, -1, 1.0),
            Motion::new(-1, -1, SQRT_2),
            Motion::new(-1, 1, SQRT_2),
            Motion::new(1, -1, SQRT_2),
            Motion::new(1, 1, SQRT_2),
        ]
    }
}

/// Wraps another model and multiplies its step costs by a constant factor.
///
/// Paths stay continuous and collision-free; only their cost, and possibly
/// their shape, change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledMotionModel<M = EightConnected> {
    inner: M,
    factor: f64,
    diagonals_only: bool,
}

impl ScaledMotionModel<EightConnected> {
    /// Scales every 8-connected step by `factor`.
    pub fn uniform(factor: f64) -> Self {
        Self::new(EightConnected, factor, false)
    }

    /// Scales only the diagonal 8-connected steps by `factor`.
    pub fn diagonal(factor: f64) -> Self {
        Self::new(EightConnected, factor, true)
    }
}

impl<M: MotionModel> ScaledMotionModel<M> {
    /// Scales the steps of `inner`. With `diagonals_only`, axis steps keep their cost.
    pub fn new(inner: M, factor: f64, diagonals_only: bool) -> Self {
        Self {
            inner,
            factor,
            diagonals_only,
        }
    }

    /// The multiplier applied to step costs.
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl<M: MotionModel> MotionModel for ScaledMotionModel<M> {
    fn motions(&self) -> Vec<Motion> {
        self.inner
            .motions()
            .into_iter()
            .map(|m| {
                if self.diagonals_only && !m.is_diagonal() {
                    m
                } else {
                    Motion::new(m.dx, m.dy, m.cost * self.factor)
                }
            })
            .collect()
    }
}

impl MotionModel for Vec<Motion> {
    fn motions(&self) -> Vec<Motion> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_connected() {
        let motions = EightConnected.motions();
        assert_eq!(motions.len(), 8);
        for m in &motions {
            assert!(m.dx.abs() <= 1 && m.dy.abs() <= 1);
            let expected = if m.is_diagonal() { SQRT_2 } else { 1.0 };
            assert_eq!(m.cost, expected);
            assert!(m.validate().is_ok());
        }
        // Every neighbor offset appears exactly once
        let mut offsets: Vec<_> = motions.iter().map(|m| (m.dx, m.dy)).collect();
        offsets.sort();
        offsets.dedup();
        assert_eq!(offsets.len(), 8);
    }

    #[test]
    fn test_scaled_diagonal() {
        let motions = ScaledMotionModel::diagonal(1.5).motions();
        for m in motions {
            if m.is_diagonal() {
                assert!((m.cost - SQRT_2 * 1.5).abs() < 1e-12);
            } else {
                assert_eq!(m.cost, 1.0);
            }
        }
    }

    #[test]
    fn test_scaled_uniform() {
        let model = ScaledMotionModel::uniform(1.5);
        assert_eq!(model.factor(), 1.5);
        let base = EightConnected.motions();
        for (scaled, plain) in model.motions().iter().zip(&base) {
            assert_eq!((scaled.dx, scaled.dy), (plain.dx, plain.dy));
            assert!((scaled.cost - plain.cost * 1.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_motion_validation() {
        assert!(Motion::new(0, 0, 1.0).validate().is_err());
        assert!(Motion::new(1, 0, -1.0).validate().is_err());
        assert!(Motion::new(1, 0, f64::NAN).validate().is_err());
        assert!(Motion::new(2, 1, 0.0).validate().is_ok());
    }
}
