//! Scenario description: obstacle generators and planning queries.

use anyhow::{Context, bail};
use serde::Deserialize;

/// A point in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

fn default_step() -> f64 {
    1.0
}

/// Outline of an axis-aligned box, sampled every `step` along each edge.
#[derive(Debug, Clone, Deserialize)]
pub struct BoxOutline {
    pub min: Point,
    pub max: Point,
    #[serde(default = "default_step")]
    pub step: f64,
}

/// Straight line of obstacles from `from` to `to`, both ends included.
#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    #[serde(default = "default_step")]
    pub step: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Obstacles {
    pub points: Vec<Point>,
    pub boxes: Vec<BoxOutline>,
    pub segments: Vec<Segment>,
}

/// A single start/goal pair to plan for.
#[derive(Debug, Clone, Deserialize)]
pub struct Query {
    pub name: String,
    pub start: Point,
    pub goal: Point,
}

impl Segment {
    /// Samples the segment so consecutive points are at most `step` apart.
    fn sample(&self, ox: &mut Vec<f64>, oy: &mut Vec<f64>) -> anyhow::Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            bail!("segment step must be positive, got {}", self.step);
        }
        let dx = self.to.x - self.from.x;
        let dy = self.to.y - self.from.y;
        let steps = (dx.hypot(dy) / self.step).ceil();
        if !steps.is_finite() {
            bail!("segment endpoints must be finite");
        }

        let steps = (steps as usize).max(1);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            ox.push(self.from.x + t * dx);
            oy.push(self.from.y + t * dy);
        }
        Ok(())
    }
}

impl BoxOutline {
    fn edges(&self) -> [Segment; 4] {
        let corners = [
            self.min,
            Point { x: self.max.x, y: self.min.y },
            self.max,
            Point { x: self.min.x, y: self.max.y },
        ];
        std::array::from_fn(|i| Segment {
            from: corners[i],
            to: corners[(i + 1) % 4],
            step: self.step,
        })
    }
}

impl Obstacles {
    /// Expands every generator into parallel obstacle coordinate lists.
    ///
    /// Points shared by adjacent edges appear more than once, which does not
    /// change the obstacle map.
    pub fn generate(&self) -> anyhow::Result<(Vec<f64>, Vec<f64>)> {
        let (mut ox, mut oy) = (Vec::new(), Vec::new());

        for point in &self.points {
            ox.push(point.x);
            oy.push(point.y);
        }
        for (i, outline) in self.boxes.iter().enumerate() {
            for edge in outline.edges() {
                edge.sample(&mut ox, &mut oy)
                    .with_context(|| format!("invalid box #{i}"))?;
            }
        }
        for (i, segment) in self.segments.iter().enumerate() {
            segment
                .sample(&mut ox, &mut oy)
                .with_context(|| format!("invalid segment #{i}"))?;
        }

        Ok((ox, oy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    #[test]
    fn test_segment_includes_both_ends() {
        let segment = Segment {
            from: point(20.0, 25.0),
            to: point(30.0, 25.0),
            step: 1.0,
        };
        let (mut ox, mut oy) = (Vec::new(), Vec::new());
        segment.sample(&mut ox, &mut oy).unwrap();
        assert_eq!(ox.len(), 11);
        assert_eq!(ox[0], 20.0);
        assert_eq!(ox[10], 30.0);
        assert!(oy.iter().all(|&y| y == 25.0));
    }

    #[test]
    fn test_zero_length_segment_is_two_points() {
        let segment = Segment {
            from: point(1.0, 1.0),
            to: point(1.0, 1.0),
            step: 1.0,
        };
        let (mut ox, mut oy) = (Vec::new(), Vec::new());
        segment.sample(&mut ox, &mut oy).unwrap();
        assert_eq!(ox, vec![1.0, 1.0]);
    }

    #[test]
    fn test_box_outline_covers_corners() {
        let obstacles = Obstacles {
            boxes: vec![BoxOutline {
                min: point(-10.0, -10.0),
                max: point(60.0, 60.0),
                step: 1.0,
            }],
            ..Default::default()
        };
        let (ox, oy) = obstacles.generate().unwrap();
        assert_eq!(ox.len(), 4 * 71);
        for corner in [(-10.0, -10.0), (60.0, -10.0), (60.0, 60.0), (-10.0, 60.0)] {
            assert!(ox.iter().zip(&oy).any(|(&x, &y)| (x, y) == corner));
        }
        assert_eq!(ox.iter().copied().fold(f64::INFINITY, f64::min), -10.0);
        assert_eq!(oy.iter().copied().fold(f64::NEG_INFINITY, f64::max), 60.0);
    }

    #[test]
    fn test_invalid_step_rejected() {
        let obstacles = Obstacles {
            segments: vec![Segment {
                from: point(0.0, 0.0),
                to: point(5.0, 0.0),
                step: 0.0,
            }],
            ..Default::default()
        };
        let err = obstacles.generate().unwrap_err();
        assert!(err.to_string().contains("segment #0"));
    }
}
