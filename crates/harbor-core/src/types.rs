//! Fundamental geographic and scene-space types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A geographic sample in degrees (WGS84-like, treated as flat for short ranges).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// 3D position in scene space.
/// x = East, y = Up (elevation), z = South (north maps to negative z).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames advanced so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds (after time scaling).
    pub elapsed_secs: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl ScenePoint {
    pub const ORIGIN: ScenePoint = ScenePoint {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Same ground position at a different elevation.
    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    /// Distance to another point (3D).
    pub fn distance_to(&self, other: &ScenePoint) -> f64 {
        DVec3::from(*self).distance(DVec3::from(*other))
    }

    /// Heading of a direction vector on the ground plane: `atan2(dx, dz)`.
    /// Returns `None` for a zero-length direction so callers can keep their
    /// previous heading.
    pub fn ground_heading(dx: f64, dz: f64) -> Option<f64> {
        if (dx * dx + dz * dz).sqrt() <= crate::constants::HEADING_EPSILON {
            None
        } else {
            Some(dx.atan2(dz))
        }
    }
}

impl From<ScenePoint> for DVec3 {
    fn from(p: ScenePoint) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

impl From<DVec3> for ScenePoint {
    fn from(v: DVec3) -> Self {
        ScenePoint::new(v.x, v.y, v.z)
    }
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
