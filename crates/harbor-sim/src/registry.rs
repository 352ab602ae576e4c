//! Entity motion registry: owns every animated entity and advances them per tick.
//!
//! Entities live in a hecs world and are indexed by a stable `EntityKey`.
//! Each carries a `Transform`, a `MotionSource`, a `Visible` flag and an
//! optional `Tooltip`. Only `advance` and the route calls below mutate
//! motion state, and the session applies those between ticks.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use tracing::debug;

use harbor_core::components::{EntityKey, Tooltip, Transform, Visible};
use harbor_core::enums::EntityKind;

use crate::motion::{MotionSource, TimedRoute};
use crate::route::RouteInterpolator;
use crate::systems;

/// Everything needed to register one entity.
#[derive(Debug, Clone)]
pub struct EntitySpec {
    pub key: EntityKey,
    pub source: MotionSource,
    pub tooltip: Option<String>,
}

#[derive(Default)]
pub struct MotionRegistry {
    world: World,
    index: BTreeMap<EntityKey, Entity>,
    /// Accumulated simulation time. Never reset, so oscillator phase drifts
    /// smoothly across the whole session.
    clock: f64,
}

impl MotionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every entity by `dt` simulation seconds.
    pub fn advance(&mut self, dt: f64) {
        self.clock += dt;
        systems::motion::run(&mut self.world, self.clock, dt);
    }

    /// Register an entity, replacing any entity with the same key.
    pub fn register(&mut self, spec: EntitySpec) -> Entity {
        self.remove(spec.key);
        let transform = spec.source.initial_transform(self.clock);
        let entity = match spec.tooltip {
            Some(text) => self.world.spawn((
                spec.key,
                transform,
                spec.source,
                Visible(true),
                Tooltip(text),
            )),
            None => self
                .world
                .spawn((spec.key, transform, spec.source, Visible(true))),
        };
        self.index.insert(spec.key, entity);
        entity
    }

    /// Remove one entity. Returns whether it existed.
    pub fn remove(&mut self, key: EntityKey) -> bool {
        match self.index.remove(&key) {
            Some(entity) => {
                let _ = self.world.despawn(entity);
                true
            }
            None => false,
        }
    }

    /// Remove every entity of `kind`. Returns how many were removed.
    pub fn remove_kind(&mut self, kind: EntityKind) -> usize {
        let keys: Vec<EntityKey> = self
            .index
            .keys()
            .filter(|key| key.kind() == kind)
            .copied()
            .collect();
        for key in &keys {
            self.remove(*key);
        }
        keys.len()
    }

    /// Dispose every entity of `kind`, then register `specs`.
    /// The old set is fully released before the new one is added.
    pub fn replace_kind(
        &mut self,
        kind: EntityKind,
        specs: impl IntoIterator<Item = EntitySpec>,
    ) -> usize {
        let removed = self.remove_kind(kind);
        let mut added = 0;
        for spec in specs {
            debug_assert_eq!(spec.key.kind(), kind);
            self.register(spec);
            added += 1;
        }
        debug!(?kind, removed, added, "replaced entity set");
        added
    }

    /// Put the tracked vessel on `route`, restarting at its first waypoint.
    ///
    /// The tracked entity is created on first use and reused afterwards;
    /// its motion source is swapped whole so no frame mixes old and new
    /// waypoints.
    pub fn play_route(&mut self, mut route: RouteInterpolator, tooltip: String) {
        route.reset();
        let sample = route.current();
        let source = MotionSource::TimedRoute(TimedRoute {
            route,
            active: true,
        });

        let Some(&entity) = self.index.get(&EntityKey::TrackedVessel) else {
            self.register(EntitySpec {
                key: EntityKey::TrackedVessel,
                source,
                tooltip: Some(tooltip),
            });
            return;
        };

        if let Ok((transform, current, visible, text)) = self
            .world
            .query_one_mut::<(&mut Transform, &mut MotionSource, &mut Visible, &mut Tooltip)>(
                entity,
            )
        {
            transform.position = sample.position;
            if let Some(heading) = sample.heading {
                transform.heading = heading;
            }
            *current = source;
            *visible = Visible(true);
            *text = Tooltip(tooltip);
        }
    }

    /// Hide the tracked vessel and reset its progress, keeping its waypoints.
    /// Returns whether an active route was stopped.
    pub fn stop_route(&mut self) -> bool {
        let Some(&entity) = self.index.get(&EntityKey::TrackedVessel) else {
            return false;
        };
        let Ok((source, visible)) = self
            .world
            .query_one_mut::<(&mut MotionSource, &mut Visible)>(entity)
        else {
            return false;
        };
        let MotionSource::TimedRoute(timed) = source else {
            return false;
        };
        let was_active = timed.active;
        timed.route.reset();
        timed.active = false;
        *visible = Visible(false);
        was_active
    }

    /// The tracked vessel's route, active or not.
    pub fn tracked_route(&self) -> Option<TimedRoute> {
        let entity = *self.index.get(&EntityKey::TrackedVessel)?;
        let source = self.world.get::<&MotionSource>(entity).ok()?;
        match &*source {
            MotionSource::TimedRoute(timed) => Some(timed.clone()),
            _ => None,
        }
    }

    pub fn transform(&self, key: EntityKey) -> Option<Transform> {
        let entity = *self.index.get(&key)?;
        self.world.get::<&Transform>(entity).ok().map(|t| *t)
    }

    pub fn is_visible(&self, key: EntityKey) -> bool {
        self.index
            .get(&key)
            .and_then(|&entity| self.world.get::<&Visible>(entity).ok().map(|v| v.0))
            .unwrap_or(false)
    }

    pub fn contains(&self, key: EntityKey) -> bool {
        self.index.contains_key(&key)
    }

    /// Registered entities, visible or not.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.index.keys().filter(|key| key.kind() == kind).count()
    }

    pub fn keys(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.index.keys().copied()
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn world(&self) -> &World {
        &self.world
    }
}
