//! Projection constants and motion tuning parameters.

// --- Projection ---

/// Meters per degree of latitude.
pub const METERS_PER_DEGREE_LAT: f64 = 111_132.0;

/// Meters per degree of longitude at the equator (scaled by cos(lat)).
pub const METERS_PER_DEGREE_LNG_EQUATOR: f64 = 111_320.0;

/// Default meters-to-scene-units multiplier.
pub const DEFAULT_SCALE: f64 = 0.02;

// --- Frame clock ---

/// Target frame rate of the scheduler (Hz).
pub const TARGET_FPS: u32 = 60;

/// Largest delta handed to the registry in one frame (seconds).
/// Caps the jump after the host was suspended.
pub const MAX_FRAME_DELTA: f64 = 0.1;

/// Upper bound for the session time scale.
pub const MAX_TIME_SCALE: f64 = 4.0;

// --- Vessels (oscillators) ---

/// Resting elevation of moored vessel proxies.
pub const VESSEL_BASE_Y: f64 = 1.5;

/// Vertical bob amplitude.
pub const BOB_AMPLITUDE: f64 = 0.3;

/// Bob angular frequency multiplier applied to the session clock.
pub const BOB_FREQUENCY: f64 = 2.0;

/// Slow spin of moored vessel proxies (radians per second).
pub const VESSEL_TURN_RATE: f64 = 0.6;

/// Anchor for vessels reported without a position.
pub const FALLBACK_VESSEL_LAT: f64 = 31.20;
pub const FALLBACK_VESSEL_LNG: f64 = 29.87;

/// Jitter (degrees) added to the fallback anchor.
pub const FALLBACK_JITTER_DEG: f64 = 0.01;

// --- Tracked route vessel ---

/// Elevation of the tracked vessel and its route line.
pub const ROUTE_ELEVATION: f64 = 1.5;

/// Shortest route duration (seconds); guards against division by zero.
pub const MIN_ROUTE_DURATION_SECS: f64 = 1.0;

/// Hover text for a tracked vessel whose final waypoint has no status.
pub const DEFAULT_ROUTE_STATUS: &str = "Inbound vessel";

// --- Yard vehicles (looped paths) ---

/// Vehicles spawned on each traffic lane.
pub const YARD_VEHICLES_PER_LANE: u32 = 2;

/// Lane progress per second (fraction of the lane).
pub const YARD_VEHICLE_SPEED: f64 = 0.05;

/// Elevation of yard vehicle proxies.
pub const YARD_VEHICLE_ELEVATION: f64 = 0.6;

// --- Misc ---

/// Direction vectors shorter than this keep the previous heading.
pub const HEADING_EPSILON: f64 = 1e-9;

/// Maximum number of arrivals kept by the AIS refresh.
pub const MAX_RECENT_ARRIVALS: usize = 25;

/// Default RNG seed for fallback vessel placement.
pub const DEFAULT_SEED: u64 = 42;
