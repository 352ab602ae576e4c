//! Tests for the dashboard session, motion registry and entity factories.

use chrono::{Duration, TimeZone, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use harbor_core::commands::DashboardCommand;
use harbor_core::components::EntityKey;
use harbor_core::enums::*;
use harbor_core::events::DashboardEvent;
use harbor_core::fixtures::{Fixtures, RouteWaypoint, VesselRecord};
use harbor_core::types::{GeoPoint, ScenePoint};
use harbor_geo::ScenePlaneProjection;

use crate::curve::CatmullRomCurve;
use crate::engine::{DashboardSession, SessionConfig};
use crate::motion::{LoopedPath, MotionSource, Oscillator};
use crate::registry::{EntitySpec, MotionRegistry};
use crate::world_setup;

fn session() -> DashboardSession {
    DashboardSession::new(SessionConfig::default(), Fixtures::builtin().unwrap())
}

fn clamped_session() -> DashboardSession {
    let mut config = SessionConfig::default();
    config.motion.route_mode = RouteMode::Clamp;
    DashboardSession::new(config, Fixtures::builtin().unwrap())
}

fn waypoints(samples: &[(i64, f64, f64)]) -> Vec<RouteWaypoint> {
    let t0 = Utc.with_ymd_and_hms(2025, 11, 18, 8, 0, 0).unwrap();
    samples
        .iter()
        .map(|&(secs, lat, lng)| RouteWaypoint {
            time: t0 + Duration::seconds(secs),
            lat,
            lng,
            speed_knots: None,
            status: None,
        })
        .collect()
}

fn vessel(name: &str, lat: Option<f64>, lng: Option<f64>) -> VesselRecord {
    VesselRecord {
        vessel_name: name.to_string(),
        flag: "EG".to_string(),
        arrival_time: None,
        dwt: None,
        grt: None,
        built_year: None,
        length_m: None,
        vessel_type: "Cargo".to_string(),
        lat,
        lng,
    }
}

// ---- Initial world ----

#[test]
fn test_initial_entities_from_fixtures() {
    let mut session = session();
    let snap = session.tick(0.0);

    assert_eq!(snap.count(EntityKind::Vessel), 3);
    // Two lanes with the default two vehicles each.
    assert_eq!(snap.count(EntityKind::YardVehicle), 4);
    assert_eq!(snap.count(EntityKind::TrackedVessel), 0);
    assert!(snap.route.is_none());

    let first = snap.entity(EntityKey::Vessel(0)).unwrap();
    assert_eq!(
        first.tooltip.as_deref(),
        Some("AKTEA OSRV\nType: OSRV\nLength: 79 m")
    );
    let lane = snap
        .entity(EntityKey::YardVehicle { lane: 1, slot: 1 })
        .unwrap();
    assert_eq!(lane.tooltip.as_deref(), Some("Internal Road 2 vehicle 2"));
    assert_eq!(lane.position.y, 0.6);
}

#[test]
fn test_projection_origin_is_layout_center() {
    let session = session();
    let origin = session.projection().origin();
    assert!((origin.lat - 31.2045796).abs() < 1e-12);
    assert!((origin.lng - 29.8800659).abs() < 1e-12);
    assert_eq!(session.projection().scale(), 0.02);
    assert!(!session.layout_markers().is_empty());
}

#[test]
fn test_determinism_same_seed() {
    let mut fixtures = Fixtures::builtin().unwrap();
    fixtures.ais.recent_arrivals = vec![vessel("A", None, None), vessel("B", None, None)];

    let mut a = DashboardSession::new(SessionConfig::default(), fixtures.clone());
    let mut b = DashboardSession::new(SessionConfig::default(), fixtures);
    for _ in 0..120 {
        let json_a = serde_json::to_string(&a.tick(1.0 / 60.0)).unwrap();
        let json_b = serde_json::to_string(&b.tick(1.0 / 60.0)).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged with same seed");
    }
}

#[test]
fn test_fallback_vessel_position_near_default_anchor() {
    let fixtures = Fixtures::builtin().unwrap();
    let projection = ScenePlaneProjection::new(fixtures.layout.center_coordinates, 0.02);
    let mut dataset = fixtures.ais.clone();
    dataset.recent_arrivals = vec![vessel("No Fix", None, None)];

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let specs = world_setup::vessel_specs(
        &dataset,
        &projection,
        &Default::default(),
        &mut rng,
    );
    assert_eq!(specs.len(), 1);
    let MotionSource::Oscillator(osc) = &specs[0].source else {
        panic!("vessel should oscillate");
    };
    let geo = projection.unproject(&osc.anchor);
    assert!((31.199..31.211).contains(&geo.lat), "{geo:?}");
    assert!((29.869..29.881).contains(&geo.lng), "{geo:?}");
    assert_eq!(
        specs[0].tooltip.as_deref(),
        Some("No Fix\nType: Cargo\nLength: n/a")
    );
}

// ---- Scenario playback ----

#[test]
fn test_scenario_route_end_to_end() {
    let mut session = clamped_session();
    session.queue_command(DashboardCommand::PlayScenario {
        key: "ship_arrival".to_string(),
    });

    let snap = session.tick(0.0);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        DashboardEvent::ScenarioStarted { label, .. } if label == "Ship Arrival"
    )));
    assert!(snap.events.iter().any(|e| matches!(
        e,
        DashboardEvent::RouteAccepted { waypoints: 4, duration_secs } if *duration_secs == 21_600.0
    )));

    let tracked = snap.entity(EntityKey::TrackedVessel).unwrap();
    // First waypoint is south of the port centre.
    assert!(tracked.position.z > 0.0);
    let start = session.projection().project(31.1, 29.8).with_y(1.5);
    assert!(tracked.position.distance_to(&start) < 1e-9);
    assert_eq!(tracked.tooltip.as_deref(), Some("moored"));

    let route = snap.route.as_ref().unwrap();
    assert_eq!(route.points.len(), 4);
    assert_eq!(route.label.as_deref(), Some("Ship Arrival"));

    let before_end = session.tick(21_000.0);
    let last_heading = before_end
        .entity(EntityKey::TrackedVessel)
        .unwrap()
        .heading;

    let snap = session.tick(600.0);
    let tracked = snap.entity(EntityKey::TrackedVessel).unwrap();
    let end = session.projection().project(31.2045, 29.8800).with_y(1.5);
    assert!(
        tracked.position.distance_to(&end) < 1e-9,
        "{:?} vs {end:?}",
        tracked.position
    );
    // Coincident bracket at the end keeps the final segment's heading.
    assert_eq!(tracked.heading, last_heading);
    assert_eq!(snap.route.as_ref().unwrap().progress_secs, 21_600.0);
}

#[test]
fn test_loop_mode_wraps_to_start() {
    let mut session = session();
    session.queue_command(DashboardCommand::PlayScenario {
        key: "ship_arrival".to_string(),
    });
    session.tick(0.0);
    let snap = session.tick(21_600.0 + 60.0);
    let progress = snap.route.unwrap().progress_secs;
    assert!((progress - 60.0).abs() < 1e-6, "{progress}");
}

#[test]
fn test_unknown_scenario_emits_event() {
    let mut session = session();
    session.queue_command(DashboardCommand::PlayScenario {
        key: "tsunami".to_string(),
    });
    let snap = session.tick(0.0);
    assert_eq!(
        snap.events,
        vec![DashboardEvent::UnknownScenario {
            key: "tsunami".to_string()
        }]
    );
    assert!(!session.registry().contains(EntityKey::TrackedVessel));
}

#[test]
fn test_panel_only_scenario_leaves_tracker_alone() {
    let mut session = session();
    session.queue_command(DashboardCommand::PlayScenario {
        key: "berth_congestion".to_string(),
    });
    let snap = session.tick(0.0);
    assert_eq!(snap.events.len(), 1);
    assert!(matches!(
        snap.events[0],
        DashboardEvent::ScenarioStarted { .. }
    ));
    assert!(!session.registry().contains(EntityKey::TrackedVessel));
}

#[test]
fn test_degenerate_route_rejected_without_mutation() {
    let mut session = session();
    session.queue_command(DashboardCommand::PlayRoute {
        route: waypoints(&[(0, 31.1, 29.8)]),
        label: None,
    });
    let snap = session.tick(0.0);
    assert!(matches!(
        snap.events.as_slice(),
        [DashboardEvent::RouteRejected { .. }]
    ));
    assert!(!session.registry().contains(EntityKey::TrackedVessel));

    // An active route survives a rejected replacement untouched.
    session.queue_command(DashboardCommand::PlayRoute {
        route: waypoints(&[(0, 31.1, 29.8), (100, 31.2, 29.9)]),
        label: Some("Pilot".to_string()),
    });
    session.tick(0.0);
    session.tick(25.0);
    let before = session.registry().tracked_route().unwrap();

    session.queue_command(DashboardCommand::PlayRoute {
        route: waypoints(&[(0, 31.1, 29.8), (100, 31.2, 29.9), (50, 31.3, 29.9)]),
        label: None,
    });
    let snap = session.tick(0.0);
    assert_eq!(session.registry().tracked_route().unwrap(), before);
    assert_eq!(snap.route.unwrap().label.as_deref(), Some("Pilot"));
}

#[test]
fn test_route_replacement_restarts_at_zero() {
    let mut session = session();
    let route = waypoints(&[(0, 31.1, 29.8), (100, 31.2, 29.9)]);
    session.queue_command(DashboardCommand::PlayRoute {
        route: route.clone(),
        label: None,
    });
    session.tick(0.0);
    let snap = session.tick(40.0);
    assert_eq!(snap.route.unwrap().progress_secs, 40.0);

    session.queue_command(DashboardCommand::PlayRoute { route, label: None });
    let snap = session.tick(0.0);
    assert_eq!(snap.route.as_ref().unwrap().progress_secs, 0.0);
    let start = session.projection().project(31.1, 29.8).with_y(1.5);
    let tracked = snap.entity(EntityKey::TrackedVessel).unwrap();
    assert!(tracked.position.distance_to(&start) < 1e-9);
    assert_eq!(tracked.tooltip.as_deref(), Some("Inbound vessel"));
}

#[test]
fn test_repeated_first_waypoint_faces_first_real_segment() {
    let mut session = session();
    session.queue_command(DashboardCommand::PlayRoute {
        route: waypoints(&[(0, 31.1, 29.8), (100, 31.1, 29.8), (200, 31.1, 29.9)]),
        label: None,
    });
    let snap = session.tick(0.0);
    let start = snap.entity(EntityKey::TrackedVessel).unwrap().heading;
    // Eastbound segment: +x.
    assert!((start - std::f64::consts::FRAC_PI_2).abs() < 1e-9, "{start}");

    let snap = session.tick(150.0);
    let moving = snap.entity(EntityKey::TrackedVessel).unwrap().heading;
    assert!((moving - start).abs() < 1e-9);
}

#[test]
fn test_stop_hides_and_keeps_waypoints() {
    let mut session = session();
    session.queue_command(DashboardCommand::PlayScenario {
        key: "ship_arrival".to_string(),
    });
    session.tick(0.0);
    session.tick(500.0);

    session.queue_command(DashboardCommand::StopRoute);
    let snap = session.tick(0.0);
    assert!(snap.events.contains(&DashboardEvent::RouteStopped));
    assert!(snap.entity(EntityKey::TrackedVessel).is_none());
    assert!(snap.route.is_none());

    let stopped = session.registry().tracked_route().unwrap();
    assert!(!stopped.active);
    assert_eq!(stopped.route.points().len(), 4);
    assert_eq!(stopped.route.progress_secs(), 0.0);

    // Stopped routes do not advance.
    session.tick(100.0);
    assert_eq!(
        session.registry().tracked_route().unwrap().route.progress_secs(),
        0.0
    );

    // Stopping twice is a no-op.
    session.queue_command(DashboardCommand::StopRoute);
    assert!(session.tick(0.0).events.is_empty());
}

// ---- Data replacement ----

#[test]
fn test_replace_vessels_swaps_entity_set() {
    let mut session = session();
    session.tick(0.0);

    let mut dataset = session.fixtures().ais.clone();
    dataset.recent_arrivals = (0..5)
        .map(|i| vessel(&format!("V{i}"), Some(31.2 + i as f64 * 0.001), Some(29.88)))
        .collect();
    session.queue_command(DashboardCommand::ReplaceVessels { dataset });

    let snap = session.tick(0.0);
    assert_eq!(snap.events, vec![DashboardEvent::VesselsReplaced { count: 5 }]);
    assert_eq!(snap.count(EntityKind::Vessel), 5);
    assert_eq!(snap.count(EntityKind::YardVehicle), 4);
    assert_eq!(session.registry().count(EntityKind::Vessel), 5);
    assert_eq!(session.fixtures().ais.recent_arrivals.len(), 5);
    assert_eq!(
        snap.entity(EntityKey::Vessel(4)).unwrap().tooltip.as_deref(),
        Some("V4\nType: Cargo\nLength: n/a")
    );

    // Shrinking releases the surplus.
    let mut dataset = session.fixtures().ais.clone();
    dataset.recent_arrivals.truncate(1);
    session.queue_command(DashboardCommand::ReplaceVessels { dataset });
    let snap = session.tick(0.0);
    assert_eq!(snap.count(EntityKind::Vessel), 1);
    assert!(!session.registry().contains(EntityKey::Vessel(1)));
}

#[test]
fn test_replacement_without_lanes_counts_only_vessels() {
    let mut fixtures = Fixtures::builtin().unwrap();
    fixtures.layout.traffic_lanes.clear();
    let mut session = DashboardSession::new(SessionConfig::default(), fixtures);

    let mut dataset = session.fixtures().ais.clone();
    dataset.recent_arrivals.push(vessel("Extra", Some(31.2), Some(29.88)));
    session.queue_command(DashboardCommand::ReplaceVessels { dataset });
    session.tick(0.0);
    assert_eq!(session.registry().len(), 4);
}

#[test]
fn test_oscillator_clock_survives_replacement() {
    let mut session = session();
    session.tick(1.0);
    assert!((session.registry().clock() - 1.0).abs() < 1e-12);

    let dataset = session.fixtures().ais.clone();
    session.queue_command(DashboardCommand::ReplaceVessels { dataset });
    let snap = session.tick(0.0);

    // Vessel 0 has phase 0; bob uses the running clock, not a fresh one.
    let y = snap.entity(EntityKey::Vessel(0)).unwrap().position.y;
    let expected = 1.5 + (1.0_f64 * 2.0).sin() * 0.3;
    assert!((y - expected).abs() < 1e-12, "{y} vs {expected}");
}

// ---- Time control ----

#[test]
fn test_pause_freezes_motion() {
    let mut session = session();
    session.tick(0.5);
    session.queue_command(DashboardCommand::Pause);
    let paused = session.tick(1.0);
    assert_eq!(paused.phase, SessionPhase::Paused);
    let frozen = session.tick(1.0);
    assert_eq!(frozen.time, paused.time);
    assert_eq!(frozen.entities, paused.entities);

    session.queue_command(DashboardCommand::Resume);
    let resumed = session.tick(0.25);
    assert_eq!(resumed.phase, SessionPhase::Running);
    assert!((resumed.time.elapsed_secs - 0.75).abs() < 1e-12);
}

#[test]
fn test_time_scale_clamped() {
    let mut session = session();
    session.queue_command(DashboardCommand::SetTimeScale { scale: 2.0 });
    let snap = session.tick(1.0);
    assert!((snap.time.elapsed_secs - 2.0).abs() < 1e-12);

    session.queue_command(DashboardCommand::SetTimeScale { scale: 100.0 });
    session.tick(0.0);
    assert_eq!(session.time_scale(), 4.0);

    session.queue_command(DashboardCommand::SetTimeScale { scale: f64::NAN });
    session.tick(0.0);
    assert_eq!(session.time_scale(), 4.0);

    session.queue_command(DashboardCommand::SetTimeScale { scale: -1.0 });
    session.tick(0.0);
    assert_eq!(session.time_scale(), 0.0);
}

#[test]
fn test_negative_delta_does_not_rewind() {
    let mut session = session();
    session.tick(2.0);
    let snap = session.tick(-5.0);
    assert!((snap.time.elapsed_secs - 2.0).abs() < 1e-12);
    assert_eq!(snap.time.tick, 2);
}

#[test]
fn test_non_finite_delta_is_ignored() {
    let mut session = session();
    session.queue_command(DashboardCommand::PlayScenario {
        key: "ship_arrival".to_string(),
    });
    session.tick(0.0);
    session.tick(f64::INFINITY);
    session.tick(f64::NAN);
    session.tick(f64::MAX);
    let snap = session.tick(0.016);

    assert!((snap.time.elapsed_secs - 0.016).abs() < 1e-12);
    assert!(session.registry().clock().is_finite());
    assert!(!snap.entities.is_empty());
    for entity in &snap.entities {
        let p = entity.position;
        assert!(
            p.x.is_finite() && p.y.is_finite() && p.z.is_finite() && entity.heading.is_finite(),
            "{:?} at {p:?}",
            entity.key
        );
    }
    assert!(snap.route.unwrap().progress_secs.is_finite());
}

#[test]
fn test_commands_apply_at_tick_boundary() {
    let mut session = session();
    session.queue_commands([
        DashboardCommand::PlayRoute {
            route: waypoints(&[(0, 31.1, 29.8), (100, 31.2, 29.9)]),
            label: None,
        },
        DashboardCommand::SetTimeScale { scale: 0.5 },
    ]);
    assert!(!session.registry().contains(EntityKey::TrackedVessel));
    assert_eq!(session.time_scale(), 1.0);

    let snap = session.tick(10.0);
    assert!(session.registry().contains(EntityKey::TrackedVessel));
    // The new route advances on the same tick it was applied.
    assert_eq!(snap.route.unwrap().progress_secs, 5.0);
}

#[test]
fn test_events_drained_once() {
    let mut session = session();
    session.queue_command(DashboardCommand::StopRoute);
    session.queue_command(DashboardCommand::PlayScenario {
        key: "nope".to_string(),
    });
    assert_eq!(session.tick(0.0).events.len(), 1);
    assert!(session.tick(0.0).events.is_empty());
}

// ---- Registry ----

fn oscillator(x: f64) -> MotionSource {
    MotionSource::Oscillator(Oscillator {
        anchor: ScenePoint::new(x, 1.5, 0.0),
        phase: 0.0,
        amplitude: 0.3,
        frequency: 2.0,
        turn_rate: 0.6,
    })
}

#[test]
fn test_registry_register_replaces_same_key() {
    let mut registry = MotionRegistry::new();
    registry.register(EntitySpec {
        key: EntityKey::Vessel(0),
        source: oscillator(1.0),
        tooltip: None,
    });
    registry.register(EntitySpec {
        key: EntityKey::Vessel(0),
        source: oscillator(9.0),
        tooltip: Some("again".to_string()),
    });
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.transform(EntityKey::Vessel(0)).unwrap().position.x, 9.0);
    assert!(registry.remove(EntityKey::Vessel(0)));
    assert!(!registry.remove(EntityKey::Vessel(0)));
    assert!(registry.is_empty());
}

#[test]
fn test_registry_advance_moves_every_source() {
    let mut registry = MotionRegistry::new();
    let curve = CatmullRomCurve::new(&[
        ScenePoint::new(0.0, 0.0, 0.0),
        ScenePoint::new(10.0, 0.0, 0.0),
    ])
    .unwrap();
    registry.register(EntitySpec {
        key: EntityKey::Vessel(0),
        source: oscillator(0.0),
        tooltip: None,
    });
    registry.register(EntitySpec {
        key: EntityKey::YardVehicle { lane: 0, slot: 0 },
        source: MotionSource::LoopedPath(LoopedPath::new(curve, 0.0, 0.1, 0.6)),
        tooltip: None,
    });

    registry.advance(1.0);
    let vessel = registry.transform(EntityKey::Vessel(0)).unwrap();
    assert!((vessel.heading - 0.6).abs() < 1e-12);
    let vehicle = registry
        .transform(EntityKey::YardVehicle { lane: 0, slot: 0 })
        .unwrap();
    assert!(vehicle.position.x > 0.0 && vehicle.position.x < 10.0);
    // Travelling along +x.
    assert!((vehicle.heading - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
}

#[test]
fn test_yard_vehicles_skip_short_lanes() {
    let fixtures = Fixtures::builtin().unwrap();
    let projection = ScenePlaneProjection::new(GeoPoint::new(31.2, 29.88), 0.02);
    let mut lanes = fixtures.layout.traffic_lanes.clone();
    lanes[0].points.truncate(1);

    let specs = world_setup::yard_vehicle_specs(&lanes, &projection, &Default::default());
    assert_eq!(specs.len(), 2);
    assert!(specs
        .iter()
        .all(|s| matches!(s.key, EntityKey::YardVehicle { lane: 1, .. })));

    let progress: Vec<f64> = specs
        .iter()
        .map(|s| match &s.source {
            MotionSource::LoopedPath(path) => path.progress(),
            _ => panic!("yard vehicles follow lanes"),
        })
        .collect();
    assert_eq!(progress, vec![0.0, 0.5]);
}
