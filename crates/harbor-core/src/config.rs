//! Dashboard configuration.
//!
//! The configuration is a YAML file (`harbor-config.yaml` by default) whose
//! sections all fall back to defaults, so an empty file or no file at all
//! yields a working session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::RouteMode;
use crate::types::GeoPoint;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        #[from]
        source: serde_yml::Error,
    },

    /// A value is out of range.
    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// RNG seed for fallback vessel placement.
    pub seed: u64,
    pub projection: ProjectionConfig,
    pub motion: MotionConfig,
    pub frame: FrameConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Meters-to-scene-units multiplier. Must be > 0.
    pub scale: f64,
    /// Overrides the port layout centre as the projection origin.
    pub origin: Option<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub vessel_base_y: f64,
    pub bob_amplitude: f64,
    pub bob_frequency: f64,
    /// Radians per second.
    pub turn_rate: f64,
    pub route_elevation: f64,
    pub route_mode: RouteMode,
    pub yard_vehicles_per_lane: u32,
    /// Lane fraction per second.
    pub yard_vehicle_speed: f64,
    pub yard_vehicle_elevation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub target_fps: u32,
    /// Cap on a single frame's delta (seconds).
    pub max_delta_secs: f64,
    /// Emit a snapshot every N frames.
    pub emit_every: u32,
}

/// Optional fixture file overrides. Unset entries use the built-in data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub port_layout: Option<PathBuf>,
    pub ais: Option<PathBuf>,
    pub kpis: Option<PathBuf>,
    pub scenarios: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            projection: ProjectionConfig::default(),
            motion: MotionConfig::default(),
            frame: FrameConfig::default(),
            data: DataConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            origin: None,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            vessel_base_y: VESSEL_BASE_Y,
            bob_amplitude: BOB_AMPLITUDE,
            bob_frequency: BOB_FREQUENCY,
            turn_rate: VESSEL_TURN_RATE,
            route_elevation: ROUTE_ELEVATION,
            route_mode: RouteMode::default(),
            yard_vehicles_per_lane: YARD_VEHICLES_PER_LANE,
            yard_vehicle_speed: YARD_VEHICLE_SPEED,
            yard_vehicle_elevation: YARD_VEHICLE_ELEVATION,
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            max_delta_secs: MAX_FRAME_DELTA,
            emit_every: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// Relative data paths are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        if let Some(base) = path.parent() {
            config.data.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as null; treat it as all defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges that the motion model relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scale = self.projection.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(invalid(format!("projection.scale must be > 0, got {scale}")));
        }
        let max_delta = self.frame.max_delta_secs;
        if !max_delta.is_finite() || max_delta <= 0.0 {
            return Err(invalid(format!(
                "frame.max_delta_secs must be > 0, got {max_delta}"
            )));
        }
        if self.frame.target_fps == 0 {
            return Err(invalid("frame.target_fps must be at least 1".to_string()));
        }
        if self.frame.emit_every == 0 {
            return Err(invalid("frame.emit_every must be at least 1".to_string()));
        }
        let motion = &self.motion;
        for (name, value) in [
            ("vessel_base_y", motion.vessel_base_y),
            ("bob_amplitude", motion.bob_amplitude),
            ("bob_frequency", motion.bob_frequency),
            ("turn_rate", motion.turn_rate),
            ("route_elevation", motion.route_elevation),
            ("yard_vehicle_speed", motion.yard_vehicle_speed),
            ("yard_vehicle_elevation", motion.yard_vehicle_elevation),
        ] {
            if !value.is_finite() {
                return Err(invalid(format!("motion.{name} must be finite, got {value}")));
            }
        }
        Ok(())
    }
}

impl DataConfig {
    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.port_layout,
            &mut self.ais,
            &mut self.kpis,
            &mut self.scenarios,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid { reason }
}
