//! Motion simulation for the harbor dashboard.
//!
//! Owns the hecs world of animated proxies, advances them once per tick
//! and produces `FrameSnapshot`s for the rendering collaborator.

pub mod curve;
pub mod engine;
pub mod motion;
pub mod registry;
pub mod route;
pub mod systems;
pub mod world_setup;

pub use engine::{DashboardSession, SessionConfig};
pub use harbor_core as core;
pub use registry::{EntitySpec, MotionRegistry};
pub use route::{RouteError, RouteInterpolator, RouteSample};

#[cfg(test)]
mod tests;
