//! Builds registrable motion entities from the loaded fixtures.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use harbor_core::components::EntityKey;
use harbor_core::config::MotionConfig;
use harbor_core::constants::*;
use harbor_core::fixtures::{AisDataset, RouteWaypoint, TrafficLane, VesselRecord};
use harbor_core::format::format_optional;
use harbor_geo::ScenePlaneProjection;

use crate::curve::CatmullRomCurve;
use crate::motion::{LoopedPath, MotionSource, Oscillator};
use crate::registry::EntitySpec;
use crate::route::{RouteError, RouteInterpolator};

/// One bobbing vessel per AIS arrival, phase-offset by its index.
///
/// Records without a position are placed near the fallback anchor with a
/// small seeded jitter.
pub fn vessel_specs(
    dataset: &AisDataset,
    projection: &ScenePlaneProjection,
    motion: &MotionConfig,
    rng: &mut ChaCha8Rng,
) -> Vec<EntitySpec> {
    dataset
        .recent_arrivals
        .iter()
        .enumerate()
        .map(|(index, vessel)| {
            let lat = vessel
                .lat
                .unwrap_or_else(|| FALLBACK_VESSEL_LAT + rng.gen::<f64>() * FALLBACK_JITTER_DEG);
            let lng = vessel
                .lng
                .unwrap_or_else(|| FALLBACK_VESSEL_LNG + rng.gen::<f64>() * FALLBACK_JITTER_DEG);

            EntitySpec {
                key: EntityKey::Vessel(index as u32),
                source: MotionSource::Oscillator(Oscillator {
                    anchor: projection.project(lat, lng).with_y(motion.vessel_base_y),
                    phase: index as f64,
                    amplitude: motion.bob_amplitude,
                    frequency: motion.bob_frequency,
                    turn_rate: motion.turn_rate,
                }),
                tooltip: Some(vessel_tooltip(vessel)),
            }
        })
        .collect()
}

/// Evenly spaced vehicles on every lane with at least two points.
pub fn yard_vehicle_specs(
    lanes: &[TrafficLane],
    projection: &ScenePlaneProjection,
    motion: &MotionConfig,
) -> Vec<EntitySpec> {
    let per_lane = motion.yard_vehicles_per_lane;
    let mut specs = Vec::new();

    for (lane_index, lane) in lanes.iter().enumerate() {
        let curve = match CatmullRomCurve::new(&projection.line(&lane.points)) {
            Ok(curve) => curve,
            Err(err) => {
                warn!(lane = %lane.name, %err, "skipping traffic lane");
                continue;
            }
        };
        for slot in 0..per_lane {
            specs.push(EntitySpec {
                key: EntityKey::YardVehicle {
                    lane: lane_index as u32,
                    slot,
                },
                source: MotionSource::LoopedPath(LoopedPath::new(
                    curve.clone(),
                    slot as f64 / per_lane as f64,
                    motion.yard_vehicle_speed,
                    motion.yard_vehicle_elevation,
                )),
                tooltip: Some(format!("{} vehicle {}", lane.name, slot + 1)),
            });
        }
    }
    specs
}

/// Build the tracked vessel's interpolator for a scenario route.
pub fn tracked_route(
    route: &[RouteWaypoint],
    projection: &ScenePlaneProjection,
    motion: &MotionConfig,
) -> Result<RouteInterpolator, RouteError> {
    RouteInterpolator::new(route, projection, motion.route_elevation, motion.route_mode)
}

pub fn vessel_tooltip(vessel: &VesselRecord) -> String {
    format!(
        "{}\nType: {}\nLength: {}",
        vessel.vessel_name,
        vessel.vessel_type,
        format_optional(vessel.length_m, "m")
    )
}

/// Status of the final waypoint, or a generic label.
pub fn route_tooltip(route: &[RouteWaypoint]) -> String {
    route
        .last()
        .and_then(|w| w.status.clone())
        .unwrap_or_else(|| DEFAULT_ROUTE_STATUS.to_string())
}
