//! ECS systems that operate on the motion world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod motion;
pub mod snapshot;
