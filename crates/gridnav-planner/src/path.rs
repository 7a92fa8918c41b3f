//! Planned paths and their reconstruction from the visited set.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::frontier::VisitedSet;
use crate::map::GridBounds;
use crate::node::Node;

/// A planned path in world coordinates, ordered goal first and start last.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Path {
    xs: Vec<f64>,
    ys: Vec<f64>,
    cost: f64,
}

impl Path {
    /// Creates a path from parallel coordinate lists and its grid cost.
    ///
    /// # Panics
    /// Panics if `xs` and `ys` differ in length.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, cost: f64) -> Self {
        assert_eq!(xs.len(), ys.len(), "path coordinate lists must be parallel");
        Self { xs, ys, cost }
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns true if the path has no waypoints.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Accumulated motion cost, in grid units.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Waypoint x coordinates, goal first.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Waypoint y coordinates, goal first.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Iterates over `(x, y)` waypoints, goal first.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// Sum of straight-line distances between consecutive waypoints, in world units.
    pub fn world_length(&self) -> f64 {
        self.points()
            .zip(self.points().skip(1))
            .map(|((x0, y0), (x1, y1))| (x1 - x0).hypot(y1 - y0))
            .sum()
    }

    /// Splits the path into its coordinate lists.
    pub fn into_xy(self) -> (Vec<f64>, Vec<f64>) {
        (self.xs, self.ys)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path ({} waypoints, cost {:.3}): ", self.len(), self.cost)?;
        for (i, (x, y)) in self.points().enumerate() {
            if i > 0 {
                write!(f, " <- ")?;
            }
            write!(f, "({x:.2}, {y:.2})")?;
        }
        Ok(())
    }
}

/// Walks parent links from `goal` back to the start node.
///
/// # Arguments
/// * `goal` - The goal node as popped from the frontier.
/// * `visited` - Finalized nodes of the same search.
/// * `bounds` - Grid geometry used to convert cells back to world coordinates.
///
/// # Returns
/// * `Result<(Vec<f64>, Vec<f64>), PlannerError>` - World coordinates, goal first
///   and start last. `MissingParent` if a parent link points outside `visited`,
///   `ParentCycle` if the links never reach a node without a parent.
pub fn calc_final_path(
    goal: &Node,
    visited: &VisitedSet,
    bounds: &GridBounds,
) -> Result<(Vec<f64>, Vec<f64>), PlannerError> {
    let mut rx = vec![bounds.x_position(goal.x)?];
    let mut ry = vec![bounds.y_position(goal.y)?];

    let mut parent_index = goal.parent_index;
    let mut steps = 0;
    while let Some(index) = parent_index {
        // A simple chain visits each finalized node at most once
        if steps >= visited.len() {
            return Err(PlannerError::ParentCycle { index });
        }
        steps += 1;

        let node = visited
            .get(index)
            .ok_or(PlannerError::MissingParent { index })?;
        rx.push(bounds.x_position(node.x)?);
        ry.push(bounds.y_position(node.y)?);
        parent_index = node.parent_index;
    }

    Ok((rx, ry))
}
