//! Snapshot system: reads the motion world and builds a `FrameSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use harbor_core::components::{EntityKey, Tooltip, Transform, Visible};
use harbor_core::enums::SessionPhase;
use harbor_core::events::DashboardEvent;
use harbor_core::state::{EntityView, FrameSnapshot, RouteView};
use harbor_core::types::SimTime;

use crate::motion::MotionSource;

/// Build the snapshot for the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: SessionPhase,
    events: Vec<DashboardEvent>,
    route_label: Option<&str>,
) -> FrameSnapshot {
    FrameSnapshot {
        time: *time,
        phase,
        entities: build_entities(world),
        route: build_route(world, route_label),
        events,
    }
}

/// Visible entities, sorted by key.
fn build_entities(world: &World) -> Vec<EntityView> {
    let mut entities: Vec<EntityView> = world
        .query::<(&EntityKey, &Transform, &Visible, Option<&Tooltip>)>()
        .iter()
        .filter(|(_, (_, _, visible, _))| visible.0)
        .map(|(_, (key, transform, _, tooltip))| EntityView {
            key: *key,
            kind: key.kind(),
            position: transform.position,
            heading: transform.heading,
            tooltip: tooltip.map(|t| t.0.clone()),
        })
        .collect();

    entities.sort_by_key(|e| e.key);
    entities
}

/// The active tracked route, if any.
fn build_route(world: &World, label: Option<&str>) -> Option<RouteView> {
    world
        .query::<&MotionSource>()
        .iter()
        .find_map(|(_, source)| match source {
            MotionSource::TimedRoute(timed) if timed.active => Some(RouteView {
                points: timed.route.points().to_vec(),
                progress_secs: timed.route.progress_secs(),
                duration_secs: timed.route.duration_secs(),
                label: label.map(str::to_string),
            }),
            _ => None,
        })
}
