//! Estimates of the remaining cost from a node to the goal.

#![warn(missing_docs)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::node::Node;

/// Weight that reproduces classical A*.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Estimates the cost to go from `node` to `goal`, in grid units.
///
/// Implementations must be shareable across threads so a planner can serve
/// concurrent queries.
pub trait Heuristic: Send + Sync {
    /// Returns the estimated remaining cost.
    fn estimate(&self, node: &Node, goal: &Node) -> f64;
}

/// Straight-line distance between grid cells, scaled by a weight.
///
/// With weight `1.0` it never overestimates an 8-connected path, so A* stays optimal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Euclidean {
    /// Multiplier applied to the distance.
    pub weight: f64,
}

impl Euclidean {
    /// Creates a Euclidean heuristic with the given weight.
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Default for Euclidean {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT)
    }
}

impl Heuristic for Euclidean {
    fn estimate(&self, node: &Node, goal: &Node) -> f64 {
        let dx = (node.x - goal.x) as f64;
        let dy = (node.y - goal.y) as f64;
        self.weight * dx.hypot(dy)
    }
}

/// Always zero. The search degenerates into Dijkstra's algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _node: &Node, _goal: &Node) -> f64 {
        0.0
    }
}

impl<F> Heuristic for F
where
    F: Fn(&Node, &Node) -> f64 + Send + Sync,
{
    fn estimate(&self, node: &Node, goal: &Node) -> f64 {
        self(node, goal)
    }
}
