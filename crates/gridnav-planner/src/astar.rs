//! Grid-based A* planner.
//!
//! `AStarPlanner` owns the obstacle map and the search strategies (heuristic, node
//! validator, motion list). Every query allocates its own frontier and visited
//! set, so a planner can be shared across threads and queried concurrently.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::frontier::{Frontier, VisitedSet};
use crate::heuristic::{Euclidean, Heuristic};
use crate::map::{GridBounds, GridIndex, ObstacleMap, index_to_world, world_to_index};
use crate::motion::{EightConnected, Motion, MotionModel};
use crate::node::Node;
use crate::path::{self, Path};
use crate::validate::{NodeValidator, ObstacleAware};

/// Represents the result of a planning query with metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanResult {
    /// The computed path, if one was found.
    pub path: Option<Path>,
    /// The number of nodes popped from the frontier during the search.
    pub nodes_explored: usize,
}

impl PlanResult {
    /// Creates a new PlanResult for a successful search.
    pub fn success(path: Path, nodes_explored: usize) -> Self {
        Self {
            path: Some(path),
            nodes_explored,
        }
    }

    /// Creates a new PlanResult for a search that found no path.
    pub fn failure(nodes_explored: usize) -> Self {
        Self {
            path: None,
            nodes_explored,
        }
    }

    /// Returns true if a path was found.
    pub fn is_success(&self) -> bool {
        self.path.is_some()
    }

    /// Returns the path if one was found.
    pub fn into_path(self) -> Option<Path> {
        self.path
    }
}

impl fmt::Display for PlanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(
                f,
                "PlanResult {{ success: true, path_length: {}, total_cost: {:.3}, nodes_explored: {} }}",
                path.len(),
                path.cost(),
                self.nodes_explored
            ),
            None => write!(
                f,
                "PlanResult {{ success: false, nodes_explored: {} }}",
                self.nodes_explored
            ),
        }
    }
}

/// A* planner over an inflated occupancy grid.
pub struct AStarPlanner {
    map: ObstacleMap,
    motions: Vec<Motion>,
    heuristic: Box<dyn Heuristic>,
    validator: Box<dyn NodeValidator>,
}

impl fmt::Debug for AStarPlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AStarPlanner")
            .field("bounds", self.map.bounds())
            .field("robot_radius", &self.map.robot_radius())
            .field("motions", &self.motions)
            .finish_non_exhaustive()
    }
}

/// Configures the strategies of an [`AStarPlanner`] before its map is built.
pub struct AStarPlannerBuilder<'a> {
    ox: &'a [f64],
    oy: &'a [f64],
    resolution: f64,
    robot_radius: f64,
    heuristic: Box<dyn Heuristic>,
    validator: Box<dyn NodeValidator>,
    motions: Vec<Motion>,
}

impl<'a> AStarPlannerBuilder<'a> {
    /// Replaces the heuristic. Defaults to [`Euclidean`] with weight `1.0`.
    pub fn heuristic(mut self, heuristic: impl Heuristic + 'static) -> Self {
        self.heuristic = Box::new(heuristic);
        self
    }

    /// Replaces the node validator. Defaults to [`ObstacleAware`].
    pub fn validator(mut self, validator: impl NodeValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Replaces the motion model. Defaults to [`EightConnected`].
    ///
    /// The model is queried once, here; the planner keeps the resulting list.
    pub fn motion_model(mut self, model: impl MotionModel) -> Self {
        self.motions = model.motions();
        self
    }

    /// Validates the configuration and builds the obstacle map.
    ///
    /// # Returns
    /// * `Result<AStarPlanner, PlannerError>` - The planner, or a validation error
    ///   for bad obstacles, resolution, robot radius or motions.
    pub fn build(self) -> Result<AStarPlanner, PlannerError> {
        let map = ObstacleMap::build(self.ox, self.oy, self.resolution, self.robot_radius)?;

        if self.motions.is_empty() {
            return Err(PlannerError::InvalidMotion("motion model yields no moves"));
        }
        for motion in &self.motions {
            motion.validate()?;
        }

        Ok(AStarPlanner {
            map,
            motions: self.motions,
            heuristic: self.heuristic,
            validator: self.validator,
        })
    }
}

impl AStarPlanner {
    /// Builds a classical A* planner: Euclidean heuristic, obstacle-aware
    /// validation and 8-connected motion.
    ///
    /// # Arguments
    /// * `ox` - Obstacle x coordinates, non-empty.
    /// * `oy` - Obstacle y coordinates, same length as `ox`.
    /// * `resolution` - Grid resolution in world units, `> 0`.
    /// * `robot_radius` - Safety radius in world units, `>= 0`.
    pub fn new(
        ox: &[f64],
        oy: &[f64],
        resolution: f64,
        robot_radius: f64,
    ) -> Result<Self, PlannerError> {
        Self::builder(ox, oy, resolution, robot_radius).build()
    }

    /// Starts a builder with the classical strategies, which can then be swapped.
    pub fn builder<'a>(
        ox: &'a [f64],
        oy: &'a [f64],
        resolution: f64,
        robot_radius: f64,
    ) -> AStarPlannerBuilder<'a> {
        AStarPlannerBuilder {
            ox,
            oy,
            resolution,
            robot_radius,
            heuristic: Box::new(Euclidean::default()),
            validator: Box::new(ObstacleAware),
            motions: EightConnected.motions(),
        }
    }

    /// Builds a planner as described by `config`.
    pub fn from_config(ox: &[f64], oy: &[f64], config: &PlannerConfig) -> Result<Self, PlannerError> {
        config.build(ox, oy)
    }

    /// World x of grid column 0.
    pub fn min_x(&self) -> f64 {
        self.map.bounds().min_x
    }

    /// World y of grid row 0.
    pub fn min_y(&self) -> f64 {
        self.map.bounds().min_y
    }

    /// Upper x bound of the obstacles.
    pub fn max_x(&self) -> f64 {
        self.map.bounds().max_x
    }

    /// Upper y bound of the obstacles.
    pub fn max_y(&self) -> f64 {
        self.map.bounds().max_y
    }

    /// Grid resolution in world units.
    pub fn resolution(&self) -> f64 {
        self.map.bounds().resolution
    }

    /// Number of grid columns.
    pub fn x_width(&self) -> i64 {
        self.map.bounds().x_width
    }

    /// Number of grid rows.
    pub fn y_width(&self) -> i64 {
        self.map.bounds().y_width
    }

    /// Gets the grid bounds.
    pub fn bounds(&self) -> &GridBounds {
        self.map.bounds()
    }

    /// Gets a mutable reference to the grid bounds, for white-box tests.
    pub fn bounds_mut(&mut self) -> &mut GridBounds {
        self.map.bounds_mut()
    }

    /// Gets the obstacle map.
    pub fn obstacle_map(&self) -> &ObstacleMap {
        &self.map
    }

    /// Gets a mutable reference to the obstacle map, for white-box tests.
    pub fn obstacle_map_mut(&mut self) -> &mut ObstacleMap {
        &mut self.map
    }

    /// The motion list used for every expansion.
    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }

    /// Converts a world coordinate into a grid index along one axis, using the
    /// planner's resolution.
    pub fn calc_xy_index(&self, position: f64, min_position: f64) -> Result<i64, PlannerError> {
        world_to_index(position, min_position, self.resolution())
    }

    /// Converts a grid index along one axis into a world coordinate, using the
    /// planner's resolution.
    pub fn calc_grid_position(&self, index: i64, min_position: f64) -> Result<f64, PlannerError> {
        index_to_world(index, min_position, self.resolution())
    }

    /// Flattened grid index of a node's cell.
    pub fn calc_grid_index(&self, node: &Node) -> GridIndex {
        self.map.bounds().grid_index(node.x, node.y)
    }

    /// Asks the configured validator whether `node` may be expanded into.
    pub fn verify_node(&self, node: &Node) -> bool {
        self.validator.is_valid(node, &self.map)
    }

    /// Estimated remaining cost from `n1` to `n2` under the configured heuristic.
    pub fn calc_heuristic(&self, n1: &Node, n2: &Node) -> f64 {
        self.heuristic.estimate(n1, n2)
    }

    /// Reconstructs world coordinates from `goal` back to the start, goal first.
    pub fn calc_final_path(
        &self,
        goal: &Node,
        visited: &VisitedSet,
    ) -> Result<(Vec<f64>, Vec<f64>), PlannerError> {
        path::calc_final_path(goal, visited, self.map.bounds())
    }

    /// Plans a path and returns its world coordinates, goal first and start last.
    ///
    /// Both lists are empty when no path exists.
    ///
    /// # Arguments
    /// * `sx`, `sy` - Start position in world coordinates.
    /// * `gx`, `gy` - Goal position in world coordinates.
    pub fn planning(
        &self,
        sx: f64,
        sy: f64,
        gx: f64,
        gy: f64,
    ) -> Result<(Vec<f64>, Vec<f64>), PlannerError> {
        Ok(self
            .plan(sx, sy, gx, gy)?
            .into_path()
            .map(Path::into_xy)
            .unwrap_or_default())
    }

    /// Start node for a world position, or `None` if it falls outside the grid.
    fn locate(&self, x: f64, y: f64) -> Result<Option<Node>, PlannerError> {
        let bounds = self.map.bounds();
        let index = |result: Result<i64, PlannerError>| match result {
            Ok(index) => Ok(Some(index)),
            // Too far away for an i64 is still just off the grid
            Err(PlannerError::IndexOverflow(_)) => Ok(None),
            Err(e) => Err(e),
        };
        let (Some(ix), Some(iy)) = (index(bounds.x_index(x))?, index(bounds.y_index(y))?) else {
            return Ok(None);
        };
        Ok(bounds.contains(ix, iy).then(|| Node::start(ix, iy)))
    }

    /// Plans a path with detailed results.
    ///
    /// # Returns
    /// * `Result<PlanResult, PlannerError>` - The search outcome. A missing path is a
    ///   normal outcome, reported as [`PlanResult::failure`]. Errors are reserved for
    ///   invalid coordinates and corrupted search state.
    pub fn plan(&self, sx: f64, sy: f64, gx: f64, gy: f64) -> Result<PlanResult, PlannerError> {
        let (start, goal) = match (self.locate(sx, sy)?, self.locate(gx, gy)?) {
            (Some(start), Some(goal)) => (start, goal),
            _ => {
                let bounds = self.map.bounds();
                warn!(
                    sx,
                    sy,
                    gx,
                    gy,
                    x_width = bounds.x_width,
                    y_width = bounds.y_width,
                    "Start or goal outside the grid, no path"
                );
                return Ok(PlanResult::failure(0));
            }
        };

        let goal_index = self.calc_grid_index(&goal);
        let mut frontier = Frontier::new();
        let mut visited = VisitedSet::new();
        frontier.offer(
            self.calc_grid_index(&start),
            start,
            self.calc_heuristic(&start, &goal),
        );

        let mut nodes_explored = 0;
        while let Some((current_index, current)) = frontier.pop() {
            nodes_explored += 1;
            trace!(node = %current, "Expanding");

            if current_index == goal_index {
                let (rx, ry) = self.calc_final_path(&current, &visited)?;
                let path = Path::new(rx, ry, current.cost);
                debug!(
                    cost = current.cost,
                    waypoints = path.len(),
                    nodes_explored,
                    "Goal found"
                );
                return Ok(PlanResult::success(path, nodes_explored));
            }

            visited.insert(current_index, current);

            for motion in &self.motions {
                let x = current.x + motion.dx;
                let y = current.y + motion.dy;
                if !self.map.bounds().contains(x, y) {
                    continue;
                }

                let node = Node::new(x, y, current.cost + motion.cost, Some(current_index));
                if !self.verify_node(&node) {
                    continue;
                }

                let index = self.calc_grid_index(&node);
                if visited.contains(index) {
                    continue;
                }

                let priority = node.cost + self.calc_heuristic(&node, &goal);
                frontier.offer(index, node, priority);
            }
        }

        debug!(nodes_explored, "Frontier exhausted, no path");
        Ok(PlanResult::failure(nodes_explored))
    }
}
