#![warn(missing_docs)]
#![doc = "Grid-based A* path planning over inflated point obstacles."]
#![doc = ""]
#![doc = "An [`AStarPlanner`] discretizes the bounding box of a set of obstacle points into"]
#![doc = "an occupancy grid, inflating every obstacle by the robot's safety radius, and"]
#![doc = "searches that grid for a minimum-cost 8-connected path. The heuristic, the node"]
#![doc = "validity check and the motion model are pluggable strategies, so variants such as"]
#![doc = "Dijkstra search or collision-ignoring planning reuse the same search loop."]
#![doc = ""]
#![doc = "Paths are returned goal first and start last. The absence of a path is a normal"]
#![doc = "outcome, reported as empty coordinate lists rather than an error."]

pub mod astar;
pub mod config;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod map;
pub mod motion;
pub mod node;
pub mod path;
pub mod validate;

pub use astar::{AStarPlanner, AStarPlannerBuilder, PlanResult};
pub use config::{HeuristicKind, PlannerConfig, ValidatorKind};
pub use error::{ErrorKind, PlannerError};
pub use frontier::{Frontier, VisitedSet};
pub use heuristic::{Euclidean, Heuristic, ZeroHeuristic};
pub use map::{GridBounds, GridIndex, ObstacleMap};
pub use motion::{EightConnected, Motion, MotionModel, ScaledMotionModel};
pub use node::Node;
pub use path::Path;
pub use validate::{AcceptAll, NodeValidator, ObstacleAware};
