//! Dashboard session: the explicitly constructed context for one dashboard run.
//!
//! `DashboardSession` owns the projection, fixtures, motion registry, clock
//! and command queue. Commands are applied only at the start of `tick`, so a
//! route played from an event handler never lands mid-frame. Completely
//! headless, so the whole session can be driven with scripted deltas.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use harbor_core::commands::DashboardCommand;
use harbor_core::config::{DashboardConfig, MotionConfig};
use harbor_core::constants::{DEFAULT_SCALE, DEFAULT_SEED, MAX_TIME_SCALE};
use harbor_core::enums::{EntityKind, SessionPhase};
use harbor_core::events::DashboardEvent;
use harbor_core::fixtures::{AisDataset, Fixtures, RouteWaypoint};
use harbor_core::format::label_for_scenario;
use harbor_core::state::FrameSnapshot;
use harbor_core::types::{GeoPoint, SimTime};
use harbor_geo::{build_layout, SceneMarker, ScenePlaneProjection};

use crate::registry::MotionRegistry;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for fallback vessel placement.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub scale: f64,
    /// Projection origin; the layout centre when `None`.
    pub origin: Option<GeoPoint>,
    pub motion: MotionConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            time_scale: 1.0,
            scale: DEFAULT_SCALE,
            origin: None,
            motion: MotionConfig::default(),
        }
    }
}

impl From<&DashboardConfig> for SessionConfig {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            seed: config.seed,
            time_scale: 1.0,
            scale: config.projection.scale,
            origin: config.projection.origin,
            motion: config.motion.clone(),
        }
    }
}

pub struct DashboardSession {
    projection: ScenePlaneProjection,
    fixtures: Fixtures,
    motion: MotionConfig,
    registry: MotionRegistry,
    time: SimTime,
    phase: SessionPhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<DashboardCommand>,
    events: Vec<DashboardEvent>,
    /// Label shown with the active route.
    route_label: Option<String>,
}

impl DashboardSession {
    /// Project the fixtures and register the initial vessels and yard vehicles.
    pub fn new(config: SessionConfig, fixtures: Fixtures) -> Self {
        let origin = config.origin.unwrap_or(fixtures.layout.center_coordinates);
        let projection = ScenePlaneProjection::new(origin, config.scale);

        let mut session = Self {
            projection,
            fixtures,
            motion: config.motion,
            registry: MotionRegistry::new(),
            time: SimTime::default(),
            phase: SessionPhase::default(),
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            route_label: None,
        };
        session.rebuild_entities();
        info!(
            port = %session.fixtures.layout.port_name,
            entities = session.registry.len(),
            "dashboard session created"
        );
        session
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: DashboardCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = DashboardCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply queued commands, advance by `dt` real seconds (scaled by the
    /// time scale, skipped while paused) and return the resulting snapshot.
    pub fn tick(&mut self, dt: f64) -> FrameSnapshot {
        self.process_commands();

        if self.phase == SessionPhase::Running {
            // Negative, NaN or overflowing deltas would poison the clock for good.
            let scaled = dt * self.time_scale;
            let scaled = if scaled.is_finite() && scaled > 0.0 {
                scaled
            } else {
                0.0
            };
            self.registry.advance(scaled);
            self.time.advance(scaled);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            self.registry.world(),
            &self.time,
            self.phase,
            events,
            self.route_label.as_deref(),
        )
    }

    /// Static infrastructure markers for the loaded layout.
    pub fn layout_markers(&self) -> Vec<SceneMarker> {
        build_layout(&self.fixtures.layout, &self.projection)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn projection(&self) -> &ScenePlaneProjection {
        &self.projection
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    pub fn registry(&self) -> &MotionRegistry {
        &self.registry
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: DashboardCommand) {
        match command {
            DashboardCommand::PlayScenario { key } => self.play_scenario(&key),
            DashboardCommand::PlayRoute { route, label } => {
                self.play_route(&route, label);
            }
            DashboardCommand::StopRoute => {
                if self.registry.stop_route() {
                    info!("route stopped");
                    self.route_label = None;
                    self.events.push(DashboardEvent::RouteStopped);
                }
            }
            DashboardCommand::ReplaceVessels { dataset } => self.replace_vessels(dataset),
            DashboardCommand::SetTimeScale { scale } => {
                self.time_scale = if scale.is_finite() {
                    scale.clamp(0.0, MAX_TIME_SCALE)
                } else {
                    self.time_scale
                };
            }
            DashboardCommand::Pause => {
                self.phase = SessionPhase::Paused;
            }
            DashboardCommand::Resume => {
                self.phase = SessionPhase::Running;
            }
        }
    }

    fn play_scenario(&mut self, key: &str) {
        let Some(scenario) = self.fixtures.scenarios.get(key) else {
            warn!(key, "unknown scenario");
            self.events.push(DashboardEvent::UnknownScenario {
                key: key.to_string(),
            });
            return;
        };

        let label = label_for_scenario(key);
        let route = scenario.route.clone();
        info!(key, %label, "scenario started");
        self.events.push(DashboardEvent::ScenarioStarted {
            key: key.to_string(),
            label: label.clone(),
        });

        // Panel-only scenarios leave the tracked vessel alone.
        if let Some(route) = route {
            self.play_route(&route, Some(label));
        }
    }

    /// Validate and play a route. Invalid routes are a no-op apart from
    /// the `RouteRejected` event.
    fn play_route(&mut self, route: &[RouteWaypoint], label: Option<String>) -> bool {
        match world_setup::tracked_route(route, &self.projection, &self.motion) {
            Ok(interpolator) => {
                let duration_secs = interpolator.duration_secs();
                self.registry
                    .play_route(interpolator, world_setup::route_tooltip(route));
                self.route_label = label;
                info!(waypoints = route.len(), duration_secs, "route accepted");
                self.events.push(DashboardEvent::RouteAccepted {
                    waypoints: route.len(),
                    duration_secs,
                });
                true
            }
            Err(err) => {
                warn!(%err, "route rejected");
                self.events.push(DashboardEvent::RouteRejected {
                    reason: err.to_string(),
                });
                false
            }
        }
    }

    /// Swap the AIS dataset wholesale: old vessels and lane vehicles are
    /// released before the new sets are registered.
    fn replace_vessels(&mut self, dataset: AisDataset) {
        self.fixtures.ais = dataset;
        self.rebuild_entities();
        let count = self.registry.count(EntityKind::Vessel);
        info!(count, "vessel set replaced");
        self.events.push(DashboardEvent::VesselsReplaced { count });
    }

    fn rebuild_entities(&mut self) {
        let vessels = world_setup::vessel_specs(
            &self.fixtures.ais,
            &self.projection,
            &self.motion,
            &mut self.rng,
        );
        self.registry.replace_kind(EntityKind::Vessel, vessels);

        let vehicles = world_setup::yard_vehicle_specs(
            &self.fixtures.layout.traffic_lanes,
            &self.projection,
            &self.motion,
        );
        self.registry.replace_kind(EntityKind::YardVehicle, vehicles);
    }
}
