//! Motion sources: the algorithm that moves each registered entity.
//!
//! A `MotionSource` is stored as an ECS component next to the entity's
//! `Transform`. The motion system steps every source once per tick.

use std::f64::consts::TAU;

use harbor_core::components::Transform;
use harbor_core::types::ScenePoint;

use crate::curve::CatmullRomCurve;
use crate::route::RouteInterpolator;

#[derive(Debug, Clone, PartialEq)]
pub enum MotionSource {
    Oscillator(Oscillator),
    LoopedPath(LoopedPath),
    TimedRoute(TimedRoute),
}

/// Fixed point that bobs vertically and slowly turns in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    /// Resting position; `anchor.y` is the base elevation.
    pub anchor: ScenePoint,
    /// Phase offset, the entity's index in its dataset.
    pub phase: f64,
    pub amplitude: f64,
    pub frequency: f64,
    /// Radians per second.
    pub turn_rate: f64,
}

/// Vehicle moving along a lane curve, wrapping back to the start.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopedPath {
    curve: CatmullRomCurve,
    /// Fraction of the lane in [0, 1).
    progress: f64,
    /// Fraction per second.
    speed: f64,
    elevation: f64,
}

/// The tracked vessel following a scenario route.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedRoute {
    pub route: RouteInterpolator,
    /// Inactive routes keep their waypoints but do not move or render.
    pub active: bool,
}

impl MotionSource {
    /// Placement before the first tick, given the registry clock.
    pub fn initial_transform(&self, clock: f64) -> Transform {
        let mut transform = Transform::default();
        match self {
            MotionSource::Oscillator(osc) => osc.step(&mut transform, clock, 0.0),
            MotionSource::LoopedPath(path) => path.place(&mut transform),
            MotionSource::TimedRoute(timed) => {
                let sample = timed.route.current();
                transform.position = sample.position;
                // No previous heading yet: face along the first real segment.
                transform.heading = sample
                    .heading
                    .or_else(|| timed.route.first_heading())
                    .unwrap_or_default();
            }
        }
        transform
    }
}

impl Oscillator {
    /// `y = base + sin(clock * frequency + phase) * amplitude`; heading spins by `dt * turn_rate`.
    pub fn step(&self, transform: &mut Transform, clock: f64, dt: f64) {
        let bob = (clock * self.frequency + self.phase).sin() * self.amplitude;
        transform.position = self.anchor.with_y(self.anchor.y + bob);
        transform.heading = (transform.heading + dt * self.turn_rate).rem_euclid(TAU);
    }
}

impl LoopedPath {
    /// `progress` is wrapped into [0, 1).
    pub fn new(curve: CatmullRomCurve, progress: f64, speed: f64, elevation: f64) -> Self {
        Self {
            curve,
            progress: wrap_unit(progress),
            speed,
            elevation,
        }
    }

    /// `progress = (progress + speed * dt) mod 1`, then sample the curve.
    pub fn step(&mut self, transform: &mut Transform, dt: f64) {
        self.progress = wrap_unit(self.progress + self.speed * dt);
        self.place(transform);
    }

    /// Write position and tangent heading at the current progress.
    /// A zero-length tangent keeps the previous heading.
    pub fn place(&self, transform: &mut Transform) {
        transform.position = self.curve.point_at(self.progress).with_y(self.elevation);
        let tangent = self.curve.tangent_at(self.progress);
        if let Some(heading) = ScenePoint::ground_heading(tangent.x, tangent.z) {
            transform.heading = heading;
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

impl TimedRoute {
    pub fn step(&mut self, transform: &mut Transform, dt: f64) {
        if !self.active {
            return;
        }
        let sample = self.route.advance(dt);
        transform.position = sample.position;
        if let Some(heading) = sample.heading {
            transform.heading = heading;
        }
    }
}

/// Wrap into [0, 1), guarding the rounding case where rem_euclid returns 1.0.
fn wrap_unit(value: f64) -> f64 {
    let wrapped = value.rem_euclid(1.0);
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
