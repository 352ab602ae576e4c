//! Motion system: advances every entity's motion source by one tick.

use hecs::World;

use harbor_core::components::Transform;

use crate::motion::MotionSource;

/// Step all motion sources. `clock` is the registry's accumulated time,
/// already including `dt`.
pub fn run(world: &mut World, clock: f64, dt: f64) {
    for (_entity, (transform, source)) in world.query_mut::<(&mut Transform, &mut MotionSource)>() {
        match source {
            MotionSource::Oscillator(osc) => osc.step(transform, clock, dt),
            MotionSource::LoopedPath(path) => path.step(transform, dt),
            MotionSource::TimedRoute(timed) => timed.step(transform, dt),
        }
    }
}
