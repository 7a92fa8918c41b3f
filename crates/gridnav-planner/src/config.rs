//! Serializable description of a planner variant.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::astar::AStarPlanner;
use crate::error::PlannerError;
use crate::heuristic::{DEFAULT_WEIGHT, Euclidean, ZeroHeuristic};
use crate::motion::ScaledMotionModel;
use crate::validate::{AcceptAll, ObstacleAware};

/// Which heuristic the planner uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HeuristicKind {
    /// Weighted straight-line distance.
    #[default]
    Euclidean,
    /// Always zero (Dijkstra).
    Zero,
}

/// Which node validator the planner uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ValidatorKind {
    /// Inside the grid and not occupied.
    #[default]
    ObstacleAware,
    /// Ignores obstacles.
    AcceptAll,
}

/// Planner parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Grid resolution in world units.
    pub resolution: f64,
    /// Safety radius in world units.
    pub robot_radius: f64,
    /// Multiplier for the Euclidean heuristic. Ignored by [`HeuristicKind::Zero`].
    pub heuristic_weight: f64,
    /// Heuristic strategy.
    pub heuristic: HeuristicKind,
    /// Node validity strategy.
    pub validator: ValidatorKind,
    /// Multiplier for diagonal step costs. `1.0` keeps the 8-connected costs.
    pub diagonal_cost_scale: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            robot_radius: 1.0,
            heuristic_weight: DEFAULT_WEIGHT,
            heuristic: HeuristicKind::default(),
            validator: ValidatorKind::default(),
            diagonal_cost_scale: 1.0,
        }
    }
}

impl PlannerConfig {
    /// Builds a planner for the given obstacles.
    pub fn build(&self, ox: &[f64], oy: &[f64]) -> Result<AStarPlanner, PlannerError> {
        if !self.heuristic_weight.is_finite() {
            return Err(PlannerError::NonFinite("heuristic weight"));
        }

        let mut builder = AStarPlanner::builder(ox, oy, self.resolution, self.robot_radius);
        builder = match self.heuristic {
            HeuristicKind::Euclidean => builder.heuristic(Euclidean::new(self.heuristic_weight)),
            HeuristicKind::Zero => builder.heuristic(ZeroHeuristic),
        };
        builder = match self.validator {
            ValidatorKind::ObstacleAware => builder.validator(ObstacleAware),
            ValidatorKind::AcceptAll => builder.validator(AcceptAll),
        };
        if self.diagonal_cost_scale != 1.0 {
            builder = builder.motion_model(ScaledMotionModel::diagonal(self.diagonal_cost_scale));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn room() -> (Vec<f64>, Vec<f64>) {
        let (mut ox, mut oy) = (Vec::new(), Vec::new());
        for i in 0..=10 {
            let v = i as f64;
            ox.extend([v, v, 0.0, 10.0]);
            oy.extend([0.0, 10.0, v, v]);
        }
        (ox, oy)
    }

    #[test]
    fn test_default_builds_classical_planner() {
        let (ox, oy) = room();
        let config = PlannerConfig {
            robot_radius: 0.5,
            ..Default::default()
        };
        let planner = AStarPlanner::from_config(&ox, &oy, &config).unwrap();
        assert_eq!(planner.x_width(), 11);
        let path = planner.plan(2.0, 2.0, 5.0, 5.0).unwrap().into_path().unwrap();
        assert_abs_diff_eq!(path.cost(), 3.0 * std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_diagonal_scale_changes_motions() {
        let (ox, oy) = room();
        let config = PlannerConfig {
            robot_radius: 0.5,
            diagonal_cost_scale: 2.0,
            ..Default::default()
        };
        let planner = config.build(&ox, &oy).unwrap();
        let diagonal = planner.motions().iter().find(|m| m.is_diagonal()).unwrap();
        assert_abs_diff_eq!(diagonal.cost, 2.0 * std::f64::consts::SQRT_2);
        let path = planner.plan(2.0, 2.0, 5.0, 5.0).unwrap().into_path().unwrap();
        assert_abs_diff_eq!(path.cost(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_accept_all_ignores_walls() {
        let (ox, oy) = room();
        let config = PlannerConfig {
            robot_radius: 0.5,
            validator: ValidatorKind::AcceptAll,
            heuristic: HeuristicKind::Zero,
            ..Default::default()
        };
        let planner = config.build(&ox, &oy).unwrap();
        assert!(planner.verify_node(&crate::node::Node::start(0, 0)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let (ox, oy) = room();
        let config = PlannerConfig {
            heuristic_weight: f64::NAN,
            ..Default::default()
        };
        assert_eq!(
            config.build(&ox, &oy).unwrap_err(),
            PlannerError::NonFinite("heuristic weight")
        );

        let config = PlannerConfig {
            diagonal_cost_scale: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.build(&ox, &oy).unwrap_err(),
            PlannerError::InvalidMotion(_)
        ));
    }
}
