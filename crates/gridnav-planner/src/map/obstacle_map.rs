//! Occupancy grid built from raw obstacle points.
//!
//! The plane is discretized over the bounding box of the obstacle points. A cell is
//! occupied when its world position lies within `robot_radius` of the nearest
//! obstacle point, i.e. the obstacles are inflated by the robot's safety radius.

#![warn(missing_docs)]

use std::fmt;
use std::ops::RangeInclusive;

use tracing::{debug, info};

use super::index::{GridIndex, flatten, index_to_world, world_to_index};
use crate::error::PlannerError;

/// Geometry of the planning grid: world bounds, resolution and size in cells.
///
/// Fields are public so the grid can be inspected, and deliberately perturbed, in
/// white-box tests. Changing them does not touch the stored occupancy cells.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    /// World x of grid column 0 (floor of the smallest obstacle x).
    pub min_x: f64,
    /// World y of grid row 0 (floor of the smallest obstacle y).
    pub min_y: f64,
    /// Ceiling of the largest obstacle x.
    pub max_x: f64,
    /// Ceiling of the largest obstacle y.
    pub max_y: f64,
    /// World units per cell.
    pub resolution: f64,
    /// Number of cells along x.
    pub x_width: i64,
    /// Number of cells along y.
    pub y_width: i64,
}

impl GridBounds {
    /// Derives grid bounds from parallel obstacle coordinate lists.
    ///
    /// # Arguments
    /// * `ox` - Obstacle x coordinates.
    /// * `oy` - Obstacle y coordinates, same length as `ox`.
    /// * `resolution` - World units per cell, must be positive.
    ///
    /// # Returns
    /// * `Result<Self, PlannerError>` - The bounds, or a validation error for
    ///   empty, mismatched or non-finite input.
    pub fn from_obstacles(ox: &[f64], oy: &[f64], resolution: f64) -> Result<Self, PlannerError> {
        if ox.is_empty() || oy.is_empty() {
            return Err(PlannerError::EmptyObstacles);
        }
        if ox.len() != oy.len() {
            return Err(PlannerError::MismatchedObstacles {
                x_len: ox.len(),
                y_len: oy.len(),
            });
        }
        if ox.iter().chain(oy).any(|v| !v.is_finite()) {
            return Err(PlannerError::NonFinite("obstacle coordinate"));
        }
        if !resolution.is_finite() {
            return Err(PlannerError::NonFinite("resolution"));
        }
        if resolution <= 0.0 {
            return Err(PlannerError::InvalidResolution(resolution));
        }

        let min_x = ox.iter().copied().fold(f64::INFINITY, f64::min).floor();
        let min_y = oy.iter().copied().fold(f64::INFINITY, f64::min).floor();
        let max_x = ox.iter().copied().fold(f64::NEG_INFINITY, f64::max).ceil();
        let max_y = oy.iter().copied().fold(f64::NEG_INFINITY, f64::max).ceil();

        // Finite inputs can still span more cells than an i64 counts
        let width = |max: f64, min: f64| {
            world_to_index(max, min, resolution)
                .ok()
                .and_then(|span| span.checked_add(1))
        };
        let (x_width, y_width) = match (width(max_x, min_x), width(max_y, min_y)) {
            (Some(x_width), Some(y_width)) => (x_width, y_width),
            (x_width, y_width) => {
                return Err(PlannerError::GridTooLarge {
                    x_width: x_width.unwrap_or(i64::MAX),
                    y_width: y_width.unwrap_or(i64::MAX),
                });
            }
        };

        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
            resolution,
            x_width,
            y_width,
        })
    }

    /// Grid column of a world x coordinate.
    pub fn x_index(&self, x: f64) -> Result<i64, PlannerError> {
        world_to_index(x, self.min_x, self.resolution)
    }

    /// Grid row of a world y coordinate.
    pub fn y_index(&self, y: f64) -> Result<i64, PlannerError> {
        world_to_index(y, self.min_y, self.resolution)
    }

    /// World x coordinate of a grid column.
    pub fn x_position(&self, ix: i64) -> Result<f64, PlannerError> {
        index_to_world(ix, self.min_x, self.resolution)
    }

    /// World y coordinate of a grid row.
    pub fn y_position(&self, iy: i64) -> Result<f64, PlannerError> {
        index_to_world(iy, self.min_y, self.resolution)
    }

    /// Flattened index of a cell.
    pub fn grid_index(&self, x: i64, y: i64) -> GridIndex {
        flatten(x, y, self.x_width)
    }

    /// Returns true if `(x, y)` lies within `[0, x_width) × [0, y_width)`.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && x < self.x_width && y >= 0 && y < self.y_width
    }
}

/// Boolean occupancy grid over [`GridBounds`].
///
/// Built once per planner and read-only while planning.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleMap {
    bounds: GridBounds,
    robot_radius: f64,
    /// Storage size, fixed at build time.
    x_cells: usize,
    y_cells: usize,
    /// Row-major: cell `(x, y)` lives at `y * x_cells + x`.
    cells: Vec<bool>,
}

impl ObstacleMap {
    /// Builds the occupancy grid for a set of obstacle points.
    ///
    /// Each obstacle stamps the disc of radius `robot_radius` around it onto the
    /// grid, visiting only the cells inside the disc's bounding box. This costs
    /// O(obstacles × (robot_radius / resolution)²) instead of the
    /// O(cells × obstacles) of a nearest-obstacle scan per cell, with the same result.
    ///
    /// # Arguments
    /// * `ox` - Obstacle x coordinates.
    /// * `oy` - Obstacle y coordinates.
    /// * `resolution` - World units per cell.
    /// * `robot_radius` - Safety radius, `>= 0`.
    pub fn build(
        ox: &[f64],
        oy: &[f64],
        resolution: f64,
        robot_radius: f64,
    ) -> Result<Self, PlannerError> {
        let bounds = GridBounds::from_obstacles(ox, oy, resolution)?;
        if !robot_radius.is_finite() {
            return Err(PlannerError::NonFinite("robot radius"));
        }
        if robot_radius < 0.0 {
            return Err(PlannerError::InvalidRobotRadius(robot_radius));
        }

        let too_large = PlannerError::GridTooLarge {
            x_width: bounds.x_width,
            y_width: bounds.y_width,
        };
        let x_cells = usize::try_from(bounds.x_width).map_err(|_| too_large.clone())?;
        let y_cells = usize::try_from(bounds.y_width).map_err(|_| too_large.clone())?;
        let total_cells = x_cells.checked_mul(y_cells).ok_or(too_large.clone())?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(total_cells)
            .map_err(|_| too_large)?;
        cells.resize(total_cells, false);

        let mut map = ObstacleMap {
            bounds,
            robot_radius,
            x_cells,
            y_cells,
            cells,
        };
        for (&x, &y) in ox.iter().zip(oy) {
            map.stamp(x, y);
        }

        info!(
            x_width = bounds.x_width,
            y_width = bounds.y_width,
            resolution,
            robot_radius,
            obstacles = ox.len(),
            occupied = map.occupied_count(),
            "Built obstacle map"
        );
        Ok(map)
    }

    /// Marks every cell within `robot_radius` of the obstacle at `(ox, oy)`.
    fn stamp(&mut self, ox: f64, oy: f64) {
        let GridBounds {
            min_x,
            min_y,
            resolution,
            ..
        } = self.bounds;
        let radius = self.robot_radius;

        let xs = cell_span(
            (ox - radius - min_x) / resolution,
            (ox + radius - min_x) / resolution,
            self.x_cells,
        );
        let ys = cell_span(
            (oy - radius - min_y) / resolution,
            (oy + radius - min_y) / resolution,
            self.y_cells,
        );

        for iy in ys {
            let wy = iy as f64 * resolution + min_y;
            for ix in xs.clone() {
                let wx = ix as f64 * resolution + min_x;
                if (wx - ox).hypot(wy - oy) <= radius {
                    let idx = iy * self.x_cells + ix;
                    self.cells[idx] = true;
                }
            }
        }
    }

    /// Gets the grid bounds.
    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    /// Gets a mutable reference to the grid bounds.
    ///
    /// Only the geometry changes; the stored cells keep the size they were built with.
    pub fn bounds_mut(&mut self) -> &mut GridBounds {
        &mut self.bounds
    }

    /// Gets the safety radius the obstacles were inflated by.
    pub fn robot_radius(&self) -> f64 {
        self.robot_radius
    }

    /// Number of stored columns.
    pub fn width(&self) -> usize {
        self.x_cells
    }

    /// Number of stored rows.
    pub fn height(&self) -> usize {
        self.y_cells
    }

    fn cell_offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.x_cells || y as usize >= self.y_cells {
            return None;
        }
        Some(y as usize * self.x_cells + x as usize)
    }

    /// Gets the occupancy of a cell, or `None` outside the stored grid.
    pub fn get(&self, x: i64, y: i64) -> Option<bool> {
        self.cell_offset(x, y).map(|idx| self.cells[idx])
    }

    /// Returns true if the cell is occupied. Cells outside the grid count as occupied.
    pub fn is_occupied(&self, x: i64, y: i64) -> bool {
        self.get(x, y).unwrap_or(true)
    }

    /// Sets the occupancy of a cell.
    pub fn set_occupied(&mut self, x: i64, y: i64, occupied: bool) -> Result<(), PlannerError> {
        let idx = self
            .cell_offset(x, y)
            .ok_or(PlannerError::OutOfBounds { x, y })?;
        self.cells[idx] = occupied;
        debug!(x, y, occupied, "Obstacle map cell overridden");
        Ok(())
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Iterates over the `(x, y)` grid coordinates of occupied cells, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        let width = self.x_cells;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &occupied)| occupied)
            .map(move |(idx, _)| ((idx % width) as i64, (idx / width) as i64))
    }
}

/// Cells covering the fractional index range `[lo, hi]`, clamped to `[0, cells)`.
///
/// Clamping happens in `f64`, so a radius larger than the grid covers it whole.
fn cell_span(lo: f64, hi: f64, cells: usize) -> RangeInclusive<usize> {
    let last = cells.saturating_sub(1) as f64;
    // One extra cell on each side absorbs rounding in the box edges
    let lo = (lo.floor() - 1.0).clamp(0.0, last);
    let hi = (hi.ceil() + 1.0).clamp(0.0, last);
    lo as usize..=hi as usize
}

impl fmt::Display for ObstacleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ObstacleMap ({}x{}, resolution: {:.3}, robot radius: {:.3})",
            self.x_cells, self.y_cells, self.bounds.resolution, self.robot_radius
        )?;
        writeln!(
            f,
            "Bounds: x [{:.3}, {:.3}], y [{:.3}, {:.3}]",
            self.bounds.min_x, self.bounds.max_x, self.bounds.min_y, self.bounds.max_y
        )?;

        // Highest row first so the printout reads like a plot
        for y in (0..self.y_cells).rev() {
            for x in 0..self.x_cells {
                let occupied = self.cells[y * self.x_cells + x];
                write!(f, "{}", if occupied { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_obstacles() {
        let err = ObstacleMap::build(&[], &[], 0.5, 0.2).unwrap_err();
        assert_eq!(err, PlannerError::EmptyObstacles);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_invalid_creation() {
        assert!(matches!(
            ObstacleMap::build(&[1.0, 2.0], &[1.0], 1.0, 0.5),
            Err(PlannerError::MismatchedObstacles { x_len: 2, y_len: 1 })
        ));
        assert!(matches!(
            ObstacleMap::build(&[1.0], &[1.0], 0.0, 0.5),
            Err(PlannerError::InvalidResolution(_))
        ));
        assert!(matches!(
            ObstacleMap::build(&[1.0], &[1.0], -1.0, 0.5),
            Err(PlannerError::InvalidResolution(_))
        ));
        assert!(matches!(
            ObstacleMap::build(&[1.0], &[1.0], 1.0, -0.5),
            Err(PlannerError::InvalidRobotRadius(_))
        ));
        assert!(matches!(
            ObstacleMap::build(&[f64::NAN], &[1.0], 1.0, 0.5),
            Err(PlannerError::NonFinite(_))
        ));
    }

    #[test]
    fn test_huge_span_is_too_large() {
        // Span exceeds the i64 range
        assert!(matches!(
            ObstacleMap::build(&[0.0, 1e20], &[0.0, 1.0], 1.0, 0.5),
            Err(PlannerError::GridTooLarge { x_width: i64::MAX, y_width: 2 })
        ));
        // Fits in an i64 but not in memory
        assert!(matches!(
            ObstacleMap::build(&[0.0, 1e15], &[0.0, 1e15], 1.0, 0.5),
            Err(PlannerError::GridTooLarge { .. })
        ));
        // Span overflows to infinity before the division
        assert!(matches!(
            GridBounds::from_obstacles(&[-f64::MAX, f64::MAX], &[0.0, 1.0], 1.0),
            Err(PlannerError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_radius_larger_than_map_occupies_everything() {
        let map = ObstacleMap::build(&[0.0, 10.0], &[0.0, 10.0], 1.0, 1e19).unwrap();
        assert_eq!(map.occupied_count(), 11 * 11);

        let map = ObstacleMap::build(&[3.0], &[4.0], 0.5, f64::MAX).unwrap();
        assert_eq!(map.occupied_count(), 1);
    }

    #[test]
    fn test_cell_span_clamps() {
        assert_eq!(cell_span(2.3, 4.7, 10), 1..=6);
        assert_eq!(cell_span(-1e30, 1e30, 10), 0..=9);
        assert_eq!(cell_span(-5.0, -3.0, 10), 0..=0);
        assert_eq!(cell_span(20.0, 30.0, 10), 9..=9);
    }

    #[test]
    fn test_bounds_from_obstacles() {
        let bounds = GridBounds::from_obstacles(&[-2.5, 7.2], &[0.4, 3.0], 0.5).unwrap();
        assert_eq!(bounds.min_x, -3.0);
        assert_eq!(bounds.max_x, 8.0);
        assert_eq!(bounds.min_y, 0.0);
        assert_eq!(bounds.max_y, 3.0);
        assert_eq!(bounds.x_width, 23);
        assert_eq!(bounds.y_width, 7);
    }

    #[test]
    fn test_single_obstacle_is_one_cell() {
        let map = ObstacleMap::build(&[0.0], &[0.0], 1.0, 0.1).unwrap();
        assert_eq!(map.width(), 1);
        assert_eq!(map.height(), 1);
        assert_eq!(map.get(0, 0), Some(true));
    }

    #[test]
    fn test_obstacle_cells_marked() {
        let map = ObstacleMap::build(&[1.0, 2.0], &[1.0, 2.0], 1.0, 0.5).unwrap();
        assert_eq!(map.width(), 2);
        assert_eq!(map.height(), 2);
        assert!(map.is_occupied(0, 0));
        assert!(map.is_occupied(1, 1));
        assert!(!map.is_occupied(0, 1));
        assert!(!map.is_occupied(1, 0));
    }

    #[test]
    fn test_obstacle_map_specific_case() {
        let map = ObstacleMap::build(&[1.0, 3.0, 5.0], &[1.0, 3.0, 5.0], 1.0, 0.5).unwrap();
        assert!(map.is_occupied(0, 0));
        assert!(map.is_occupied(2, 2));
        assert!(map.is_occupied(4, 4));
        assert!(!map.is_occupied(1, 1));
        assert_eq!(map.occupied_count(), 3);
        let cells: Vec<_> = map.occupied_cells().collect();
        assert_eq!(cells, vec![(0, 0), (2, 2), (4, 4)]);
    }

    #[test]
    fn test_inflation_radius_inclusive() {
        // Cells exactly one radius away are occupied, diagonal ones (√2) are not
        let map = ObstacleMap::build(&[0.0, 4.0, 2.0], &[0.0, 4.0, 2.0], 1.0, 1.0).unwrap();
        assert!(map.is_occupied(2, 2));
        assert!(map.is_occupied(1, 2));
        assert!(map.is_occupied(3, 2));
        assert!(map.is_occupied(2, 1));
        assert!(map.is_occupied(2, 3));
        assert!(!map.is_occupied(1, 3));
        assert!(!map.is_occupied(3, 1));
    }

    #[test]
    fn test_stamping_matches_nearest_distance() {
        let ox = [0.3, 2.7, 5.1, 8.8, 4.4, 9.9];
        let oy = [0.0, 3.3, 7.7, 1.2, 4.4, 9.9];
        let resolution = 0.5;
        let radius = 1.3;
        let map = ObstacleMap::build(&ox, &oy, resolution, radius).unwrap();
        let bounds = *map.bounds();

        for iy in 0..bounds.y_width {
            for ix in 0..bounds.x_width {
                let wx = bounds.x_position(ix).unwrap();
                let wy = bounds.y_position(iy).unwrap();
                let nearest = ox
                    .iter()
                    .zip(&oy)
                    .map(|(&x, &y)| (x - wx).hypot(y - wy))
                    .fold(f64::INFINITY, f64::min);
                assert_eq!(map.is_occupied(ix, iy), nearest <= radius, "cell ({ix}, {iy})");
            }
        }
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut map = ObstacleMap::build(&[0.0, 4.0], &[0.0, 4.0], 1.0, 0.1).unwrap();
        assert_eq!(map.get(5, 0), None);
        assert_eq!(map.get(-1, 0), None);
        assert!(map.is_occupied(-1, 2));
        assert!(matches!(
            map.set_occupied(0, 5, true),
            Err(PlannerError::OutOfBounds { x: 0, y: 5 })
        ));

        map.set_occupied(2, 2, true).unwrap();
        assert!(map.is_occupied(2, 2));
        map.set_occupied(2, 2, false).unwrap();
        assert!(!map.is_occupied(2, 2));
    }

    #[test]
    fn test_bounds_mut_keeps_storage() {
        let mut map = ObstacleMap::build(&[0.0, 4.0], &[0.0, 4.0], 1.0, 0.1).unwrap();
        map.bounds_mut().x_width = 100;
        assert_eq!(map.width(), 5);
        assert!(map.bounds().contains(50, 0));
        assert!(map.is_occupied(50, 0));
    }

    #[test]
    fn test_display() {
        let map = ObstacleMap::build(&[0.0, 2.0], &[0.0, 2.0], 1.0, 0.1).unwrap();
        let display_str = format!("{}", map);
        assert!(display_str.contains("ObstacleMap (3x3"));
        assert!(display_str.contains("..#"));
        assert!(display_str.contains("#.."));
    }
}
