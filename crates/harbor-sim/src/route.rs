//! Route interpolation: position and heading along a timestamped route.
//!
//! Waypoints are projected once at construction. Progress is kept in
//! simulation seconds and mapped onto the waypoint sequence uniformly by
//! index, so every segment takes an equal share of the route duration.

use harbor_core::constants::MIN_ROUTE_DURATION_SECS;
use harbor_core::enums::RouteMode;
use harbor_core::fixtures::RouteWaypoint;
use harbor_core::types::ScenePoint;
use harbor_geo::ScenePlaneProjection;

/// Reasons a route is not accepted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    #[error("route needs at least 2 waypoints, got {count}")]
    TooFewWaypoints { count: usize },

    #[error("waypoint {index} is timestamped before the waypoint preceding it")]
    TimeReversed { index: usize },
}

/// Interpolated placement along a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSample {
    pub position: ScenePoint,
    /// `None` when the bracketing waypoints coincide; keep the previous heading.
    pub heading: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteInterpolator {
    points: Vec<ScenePoint>,
    duration_secs: f64,
    mode: RouteMode,
    progress_secs: f64,
}

impl RouteInterpolator {
    /// Project `route` at `elevation` and measure its active window.
    ///
    /// # Errors
    ///
    /// [`RouteError::TooFewWaypoints`] for fewer than 2 waypoints,
    /// [`RouteError::TimeReversed`] if a timestamp goes backwards.
    pub fn new(
        route: &[RouteWaypoint],
        projection: &ScenePlaneProjection,
        elevation: f64,
        mode: RouteMode,
    ) -> Result<Self, RouteError> {
        let (first, last) = match route {
            [first, .., last] => (first, last),
            _ => return Err(RouteError::TooFewWaypoints { count: route.len() }),
        };
        if let Some(index) = route
            .windows(2)
            .position(|pair| pair[1].time < pair[0].time)
        {
            return Err(RouteError::TimeReversed { index: index + 1 });
        }

        let millis = (last.time - first.time).num_milliseconds() as f64;
        let duration_secs = (millis / 1000.0).max(MIN_ROUTE_DURATION_SECS);

        let points = route
            .iter()
            .map(|w| projection.project(w.lat, w.lng).with_y(elevation))
            .collect();

        Ok(Self {
            points,
            duration_secs,
            mode,
            progress_secs: 0.0,
        })
    }

    /// Advance progress by `dt` simulation seconds and sample the new position.
    pub fn advance(&mut self, dt: f64) -> RouteSample {
        self.progress_secs = self.wrap(self.progress_secs + dt);
        self.current()
    }

    /// Sample at the current progress.
    pub fn current(&self) -> RouteSample {
        self.sample_at(self.progress_secs)
    }

    /// Sample at an arbitrary elapsed time without touching progress.
    /// Loop mode wraps `elapsed` modulo the duration; clamp mode holds at the ends.
    pub fn sample_at(&self, elapsed_secs: f64) -> RouteSample {
        self.sample_normalized(self.wrap(elapsed_secs) / self.duration_secs)
    }

    /// Sample at normalized route time `t` in [0, 1].
    pub fn sample_normalized(&self, t: f64) -> RouteSample {
        let last = self.points.len() - 1;
        let segment = t.clamp(0.0, 1.0) * last as f64;
        let i0 = (segment.floor() as usize).min(last);
        let i1 = (i0 + 1).min(last);
        let frac = segment - i0 as f64;

        let start = self.points[i0];
        let end = self.points[i1];
        let position = glam::DVec3::from(start).lerp(glam::DVec3::from(end), frac);

        RouteSample {
            position: position.into(),
            heading: ScenePoint::ground_heading(end.x - start.x, end.z - start.z),
        }
    }

    /// Heading of the first segment whose endpoints differ.
    pub fn first_heading(&self) -> Option<f64> {
        self.points.windows(2).find_map(|pair| {
            ScenePoint::ground_heading(pair[1].x - pair[0].x, pair[1].z - pair[0].z)
        })
    }

    /// Restart from the first waypoint.
    pub fn reset(&mut self) {
        self.progress_secs = 0.0;
    }

    fn wrap(&self, secs: f64) -> f64 {
        match self.mode {
            RouteMode::Loop => {
                let wrapped = secs.rem_euclid(self.duration_secs);
                // rem_euclid can round up to the divisor for tiny negative inputs.
                if wrapped >= self.duration_secs {
                    0.0
                } else {
                    wrapped
                }
            }
            RouteMode::Clamp => secs.clamp(0.0, self.duration_secs),
        }
    }

    /// Projected waypoints, in route order.
    pub fn points(&self) -> &[ScenePoint] {
        &self.points
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn progress_secs(&self) -> f64 {
        self.progress_secs
    }

    pub fn mode(&self) -> RouteMode {
        self.mode
    }
}
