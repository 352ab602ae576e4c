//! Uniform Catmull-Rom curve through a traffic lane's projected points.
//!
//! Used by looped-path motion: any interior fraction can be evaluated, and
//! the curve yields a tangent for heading. Open curves extrapolate a phantom
//! control point beyond each end, so a two-point lane is a straight line.

use glam::DVec3;

use harbor_core::types::ScenePoint;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("curve needs at least 2 points, got {count}")]
    TooFewPoints { count: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve {
    points: Vec<DVec3>,
}

impl CatmullRomCurve {
    pub fn new(points: &[ScenePoint]) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints {
                count: points.len(),
            });
        }
        Ok(Self {
            points: points.iter().map(|&p| DVec3::from(p)).collect(),
        })
    }

    /// Point at curve parameter `u` in [0, 1].
    pub fn point_at(&self, u: f64) -> ScenePoint {
        let (p0, p1, p2, p3, t) = self.segment(u);
        let t2 = t * t;
        let t3 = t2 * t;
        let v = 0.5
            * (2.0 * p1
                + (p2 - p0) * t
                + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
                + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3);
        v.into()
    }

    /// Derivative with respect to the segment parameter at `u`.
    /// Only the direction is meaningful.
    pub fn tangent_at(&self, u: f64) -> DVec3 {
        let (p0, p1, p2, p3, t) = self.segment(u);
        0.5 * ((p2 - p0)
            + 2.0 * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t
            + 3.0 * (3.0 * p1 - p0 - 3.0 * p2 + p3) * t * t)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Control points and local parameter for global parameter `u`.
    fn segment(&self, u: f64) -> (DVec3, DVec3, DVec3, DVec3, f64) {
        let segments = self.points.len() - 1;
        let scaled = u.clamp(0.0, 1.0) * segments as f64;
        let index = (scaled.floor() as usize).min(segments - 1);
        let t = scaled - index as f64;

        let p1 = self.points[index];
        let p2 = self.points[index + 1];
        let p0 = if index > 0 {
            self.points[index - 1]
        } else {
            2.0 * p1 - p2
        };
        let p3 = if index + 2 < self.points.len() {
            self.points[index + 2]
        } else {
            2.0 * p2 - p1
        };
        (p0, p1, p2, p3, t)
    }
}
