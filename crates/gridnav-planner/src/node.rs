//! Per-cell search state.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::map::GridIndex;

/// Parent index printed for a node without a predecessor.
pub const NO_PARENT: GridIndex = -1;

/// A search node: grid coordinates, accumulated cost from the start, and the
/// grid index of its predecessor in the visited set.
///
/// Nodes are never updated in place; a cheaper route to a cell produces a new node.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// Grid column.
    pub x: i64,
    /// Grid row.
    pub y: i64,
    /// Accumulated path cost from the start, in grid units.
    pub cost: f64,
    /// Grid index of the predecessor, `None` for the start node.
    pub parent_index: Option<GridIndex>,
}

impl Node {
    /// Creates a new `Node`.
    #[must_use]
    pub const fn new(x: i64, y: i64, cost: f64, parent_index: Option<GridIndex>) -> Self {
        Self {
            x,
            y,
            cost,
            parent_index,
        }
    }

    /// Creates a zero-cost node with no parent, as used to seed a search.
    #[must_use]
    pub const fn start(x: i64, y: i64) -> Self {
        Self::new(x, y, 0.0, None)
    }
}

/// Renders as `x,y,cost,parent_index`, with `-1` for a missing parent.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.x,
            self.y,
            self.cost,
            self.parent_index.unwrap_or(NO_PARENT)
        )
    }
}
