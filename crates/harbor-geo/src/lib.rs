//! Geographic projection and static scene layout for the harbor dashboard.
//!
//! Converts lat/lng fixtures into scene space and places the port's
//! fixed infrastructure markers.

pub use harbor_core as core;

pub mod layout;
pub mod projection;

// Re-export key types for convenience.
pub use layout::{build_layout, sun_position, MarkerShape, SceneMarker};
pub use projection::ScenePlaneProjection;
