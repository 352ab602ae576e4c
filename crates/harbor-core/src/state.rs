//! Frame snapshot: the animated state handed to the rendering collaborator each tick.

use serde::{Deserialize, Serialize};

use crate::components::EntityKey;
use crate::enums::{EntityKind, SessionPhase};
use crate::events::DashboardEvent;
use crate::types::{ScenePoint, SimTime};

/// Complete animated state after one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    /// Visible proxies, sorted by key.
    pub entities: Vec<EntityView>,
    /// Active tracked route, if any.
    pub route: Option<RouteView>,
    pub events: Vec<DashboardEvent>,
}

/// One visible proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub key: EntityKey,
    pub kind: EntityKind,
    pub position: ScenePoint,
    /// Radians, `atan2(dx, dz)`.
    pub heading: f64,
    pub tooltip: Option<String>,
}

/// The tracked vessel's route line and progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteView {
    pub points: Vec<ScenePoint>,
    pub progress_secs: f64,
    pub duration_secs: f64,
    pub label: Option<String>,
}

impl FrameSnapshot {
    /// Look up a visible entity by key.
    pub fn entity(&self, key: EntityKey) -> Option<&EntityView> {
        self.entities.iter().find(|e| e.key == key)
    }

    /// Number of visible entities of a kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}
