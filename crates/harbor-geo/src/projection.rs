//! Geographic projection: converts lat/lng into scene-space coordinates.
//!
//! Flat-earth equirectangular projection anchored at the port centre.
//! Suitable for a single port's extent only.

use harbor_core::constants::{METERS_PER_DEGREE_LAT, METERS_PER_DEGREE_LNG_EQUATOR};
use harbor_core::types::{GeoPoint, ScenePoint};

/// Projection anchored at a fixed origin with a linear scale.
///
/// The origin maps to scene (0, 0, 0). x grows to the east; north maps to
/// negative z. The projector never sets elevation: y is always 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePlaneProjection {
    origin: GeoPoint,
    scale: f64,
    /// Cached `111320 * cos(origin_lat)`.
    meters_per_degree_lng: f64,
}

impl ScenePlaneProjection {
    /// Create a projection centred on `origin`. `scale` must be > 0;
    /// configuration validation enforces this before a session is built.
    pub fn new(origin: GeoPoint, scale: f64) -> Self {
        Self {
            origin,
            scale,
            meters_per_degree_lng: METERS_PER_DEGREE_LNG_EQUATOR
                * origin.lat.to_radians().cos(),
        }
    }

    /// Convert lat/lng (degrees) to a scene point on the ground plane.
    ///
    /// Non-finite input propagates as non-finite output.
    pub fn project(&self, lat: f64, lng: f64) -> ScenePoint {
        let x = (lng - self.origin.lng) * self.meters_per_degree_lng * self.scale;
        let z = -(lat - self.origin.lat) * METERS_PER_DEGREE_LAT * self.scale;
        ScenePoint::new(x, 0.0, z)
    }

    pub fn project_point(&self, point: &GeoPoint) -> ScenePoint {
        self.project(point.lat, point.lng)
    }

    /// Project a sequence of points, preserving order and count.
    pub fn line(&self, points: &[GeoPoint]) -> Vec<ScenePoint> {
        points.iter().map(|p| self.project_point(p)).collect()
    }

    /// Inverse of [`project`](Self::project), ignoring elevation.
    pub fn unproject(&self, point: &ScenePoint) -> GeoPoint {
        let lng = self.origin.lng + point.x / (self.meters_per_degree_lng * self.scale);
        let lat = self.origin.lat - point.z / (METERS_PER_DEGREE_LAT * self.scale);
        GeoPoint::new(lat, lng)
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Meters per degree of longitude at the origin latitude.
    pub fn meters_per_degree_lng(&self) -> f64 {
        self.meters_per_degree_lng
    }
}
