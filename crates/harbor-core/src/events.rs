//! Events emitted by the session for UI feedback.

use serde::{Deserialize, Serialize};

/// Session events, drained into the next snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DashboardEvent {
    /// A scenario was selected.
    ScenarioStarted { key: String, label: String },
    /// No scenario with that key exists.
    UnknownScenario { key: String },
    /// The tracked vessel accepted a new route.
    RouteAccepted { waypoints: usize, duration_secs: f64 },
    /// A route was ignored; tracker state is unchanged.
    RouteRejected { reason: String },
    /// The tracked vessel was hidden.
    RouteStopped,
    /// The AIS vessel set was rebuilt.
    VesselsReplaced { count: usize },
}
