//! Commands sent from the host (UI, scenario buttons, stdin) to the session.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::fixtures::{AisDataset, RouteWaypoint};

/// All possible operator actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DashboardCommand {
    // --- Scenarios ---
    /// Play a named scenario from the loaded fixtures.
    PlayScenario { key: String },
    /// Play an ad hoc route on the tracked vessel.
    PlayRoute {
        route: Vec<RouteWaypoint>,
        #[serde(default)]
        label: Option<String>,
    },
    /// Hide the tracked vessel and reset its progress.
    StopRoute,

    // --- Data ---
    /// Replace the AIS vessel set wholesale.
    ReplaceVessels { dataset: AisDataset },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f64 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
