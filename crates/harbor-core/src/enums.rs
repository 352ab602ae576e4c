//! Enumeration types used throughout the dashboard.

use serde::{Deserialize, Serialize};

/// What kind of proxy an entity represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    /// Moored vessel from the AIS dataset (oscillator motion).
    Vessel,
    /// Yard vehicle following a traffic lane (looped path motion).
    YardVehicle,
    /// The single vessel following a scenario route (timed route motion).
    TrackedVessel,
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Running,
    Paused,
}

/// How a timed route behaves once its duration has elapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteMode {
    /// Wrap progress modulo the route duration.
    #[default]
    Loop,
    /// Hold at the final waypoint.
    Clamp,
}

/// Static layout marker categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    Ground,
    Boundary,
    Berth,
    ContainerYard,
    Warehouse,
    TrafficLane,
}
