//! Conversions between continuous world coordinates and integer grid indices.
//!
//! A world coordinate `p` maps to the cell `round((p - min_bound) / resolution)`,
//! and cell `i` maps back to `i * resolution + min_bound`. Going world → grid → world
//! moves a point by at most half a cell.

#![warn(missing_docs)]

use crate::error::PlannerError;

/// A single integer identifying a grid cell: `x + y * x_width`.
///
/// Only meaningful for cells inside `[0, x_width) × [0, y_width)`.
pub type GridIndex = i64;

/// Converts a world coordinate along one axis into a grid index.
///
/// # Arguments
/// * `position` - World coordinate.
/// * `min_bound` - World coordinate of grid index 0 along the same axis.
/// * `resolution` - World units per cell.
///
/// # Returns
/// * `Result<i64, PlannerError>` - The rounded index, `DivisionByZero` if
///   `resolution == 0`, `NonFinite` if any argument is NaN or infinite, or
///   `IndexOverflow` if the index does not fit in an `i64`.
pub fn world_to_index(position: f64, min_bound: f64, resolution: f64) -> Result<i64, PlannerError> {
    if !position.is_finite() {
        return Err(PlannerError::NonFinite("position"));
    }
    if !min_bound.is_finite() {
        return Err(PlannerError::NonFinite("min bound"));
    }
    if resolution == 0.0 {
        return Err(PlannerError::DivisionByZero);
    }
    if !resolution.is_finite() {
        return Err(PlannerError::NonFinite("resolution"));
    }

    let index = ((position - min_bound) / resolution).round();
    if !index.is_finite() {
        return Err(PlannerError::NonFinite("grid index"));
    }
    // 2^63 is exactly representable; anything at or above it would saturate
    if index < i64::MIN as f64 || index >= i64::MAX as f64 {
        return Err(PlannerError::IndexOverflow(index));
    }
    Ok(index as i64)
}

/// Converts a grid index along one axis back into a world coordinate.
///
/// # Returns
/// * `Result<f64, PlannerError>` - `index * resolution + min_bound`, or
///   `NonFinite` if the bound or resolution is NaN or infinite.
pub fn index_to_world(index: i64, min_bound: f64, resolution: f64) -> Result<f64, PlannerError> {
    if !min_bound.is_finite() {
        return Err(PlannerError::NonFinite("min bound"));
    }
    if !resolution.is_finite() {
        return Err(PlannerError::NonFinite("resolution"));
    }
    Ok(index as f64 * resolution + min_bound)
}

/// Flattens 2-D grid coordinates into a single [`GridIndex`].
///
/// No bounds check is done here; coordinates outside the grid produce indices
/// that may collide with in-grid cells, so callers bounds-check first.
pub fn flatten(grid_x: i64, grid_y: i64, x_width: i64) -> GridIndex {
    grid_x + grid_y * x_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_world_to_index() {
        assert_eq!(world_to_index(0.0, -5.0, 0.5).unwrap(), 10);
        assert_eq!(world_to_index(-5.0, -5.0, 0.5).unwrap(), 0);
        assert_eq!(world_to_index(2.3, -5.0, 0.5).unwrap(), 15);
        assert_eq!(world_to_index(-1.0, -2.0, 0.5).unwrap(), 2);
        assert_eq!(world_to_index(5.0, 0.0, 1.0).unwrap(), 5);
    }

    #[test]
    fn test_world_to_index_below_bound_is_negative() {
        assert_eq!(world_to_index(-3.0, 0.0, 1.0).unwrap(), -3);
    }

    #[test]
    fn test_world_to_index_zero_resolution() {
        let err = world_to_index(1.0, 0.0, 0.0).unwrap_err();
        assert_eq!(err, PlannerError::DivisionByZero);
        assert_eq!(err.kind(), ErrorKind::ArithmeticDomain);
    }

    #[test]
    fn test_world_to_index_non_finite() {
        assert_eq!(
            world_to_index(f64::NAN, 0.0, 1.0),
            Err(PlannerError::NonFinite("position"))
        );
        assert_eq!(
            world_to_index(1.0, f64::INFINITY, 1.0),
            Err(PlannerError::NonFinite("min bound"))
        );
        assert_eq!(
            world_to_index(1.0, 0.0, f64::NAN),
            Err(PlannerError::NonFinite("resolution"))
        );
        // Span overflows before the division
        assert_eq!(
            world_to_index(f64::MAX, -f64::MAX, f64::MIN_POSITIVE),
            Err(PlannerError::NonFinite("grid index"))
        );
    }

    #[test]
    fn test_world_to_index_overflow() {
        assert_eq!(
            world_to_index(1e20, 0.0, 1.0),
            Err(PlannerError::IndexOverflow(1e20))
        );
        assert_eq!(
            world_to_index(-1e20, 0.0, 1.0),
            Err(PlannerError::IndexOverflow(-1e20))
        );
        // Largest span that still fits
        assert_eq!(world_to_index(1e18, 0.0, 1.0).unwrap(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn test_index_to_world() {
        assert_eq!(index_to_world(0, -5.0, 0.5).unwrap(), -5.0);
        assert_eq!(index_to_world(0, -3.0, 0.5).unwrap(), -3.0);
        assert_eq!(index_to_world(4, -5.0, 0.5).unwrap(), -3.0);
        assert_eq!(index_to_world(6, -3.0, 0.5).unwrap(), 0.0);
        assert!((index_to_world(3, -5.0, 0.5).unwrap() + 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_index_to_world_non_finite() {
        assert_eq!(
            index_to_world(1, f64::NAN, 1.0),
            Err(PlannerError::NonFinite("min bound"))
        );
        assert_eq!(
            index_to_world(1, 0.0, f64::NEG_INFINITY),
            Err(PlannerError::NonFinite("resolution"))
        );
    }

    #[test]
    fn test_flatten() {
        assert_eq!(flatten(3, 4, 10), 43);
        assert_eq!(flatten(0, 0, 10), 0);
        assert_eq!(flatten(9, 9, 10), 99);
        // Outside the grid the index runs past the cell count
        assert!(flatten(1000, 1000, 100) >= 100 * 100);
    }

    #[test]
    fn test_round_trip_within_half_cell() {
        let resolution = 0.7;
        let min_bound = -3.2;
        for step in 0..200 {
            let position = -3.2 + step as f64 * 0.113;
            let index = world_to_index(position, min_bound, resolution).unwrap();
            let back = index_to_world(index, min_bound, resolution).unwrap();
            assert!((back - position).abs() <= resolution / 2.0 + 1e-9);
        }
    }
}
