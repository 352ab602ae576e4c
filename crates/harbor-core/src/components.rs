//! ECS components for hecs entities.
//!
//! Components are plain data structs. Motion logic lives in the
//! simulation crate's systems, not here.

use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::types::ScenePoint;

/// Stable identifier of a motion entity, independent of hecs entity ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKey {
    /// Index into the AIS `recent_arrivals` list.
    Vessel(u32),
    /// Vehicle `slot` on traffic lane `lane`.
    YardVehicle { lane: u32, slot: u32 },
    /// The scenario route vessel (at most one exists).
    TrackedVessel,
}

impl EntityKey {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityKey::Vessel(_) => EntityKind::Vessel,
            EntityKey::YardVehicle { .. } => EntityKind::YardVehicle,
            EntityKey::TrackedVessel => EntityKind::TrackedVessel,
        }
    }
}

/// Scene placement written by the motion systems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: ScenePoint,
    /// Heading in radians, `atan2(dx, dz)` of the direction of travel.
    pub heading: f64,
}

/// Hover description attached to a proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tooltip(pub String);

/// Whether the proxy is included in rendering output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visible(pub bool);
