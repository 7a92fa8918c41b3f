//! Node validity checks used when expanding neighbors.

#![warn(missing_docs)]

use crate::map::ObstacleMap;
use crate::node::Node;

/// Decides whether a candidate node may join the search.
///
/// The search loop rejects cells outside the grid before consulting the validator,
/// so an implementation can only narrow what the grid already allows.
pub trait NodeValidator: Send + Sync {
    /// Returns true if `node` may be expanded into.
    fn is_valid(&self, node: &Node, map: &ObstacleMap) -> bool;
}

/// The standard check: inside the grid and not occupied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObstacleAware;

impl NodeValidator for ObstacleAware {
    fn is_valid(&self, node: &Node, map: &ObstacleMap) -> bool {
        map.bounds().contains(node.x, node.y) && !map.is_occupied(node.x, node.y)
    }
}

/// Accepts every node, ignoring obstacles. Paths stay continuous and inside the
/// grid but may pass through occupied cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl NodeValidator for AcceptAll {
    fn is_valid(&self, _node: &Node, _map: &ObstacleMap) -> bool {
        true
    }
}

impl<F> NodeValidator for F
where
    F: Fn(&Node, &ObstacleMap) -> bool + Send + Sync,
{
    fn is_valid(&self, node: &Node, map: &ObstacleMap) -> bool {
        self(node, map)
    }
}
