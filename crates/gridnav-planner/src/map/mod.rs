//! Map-related functionality for planning.
//!
//! This module provides the coordinate indexer that links world coordinates to
//! grid cells, and the obstacle map built from raw obstacle points.

pub mod index;
pub mod obstacle_map;

pub use index::{GridIndex, flatten, index_to_world, world_to_index};
pub use obstacle_map::{GridBounds, ObstacleMap};
