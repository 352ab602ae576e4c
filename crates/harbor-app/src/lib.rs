//! Harbor dashboard host.
//!
//! Wires the fixtures, the dashboard session and the frame loop together
//! and exposes them to the `harbor` binary. Rendering is left to whatever
//! consumes the JSON snapshot stream.

pub mod error;
pub mod frame_loop;
pub mod input;
pub mod sink;
pub mod state;

use harbor_core::config::DashboardConfig;
use harbor_core::fixtures::Fixtures;
use harbor_sim::{DashboardSession, SessionConfig};

pub use error::AppError;
pub use harbor_core as core;

/// Load fixtures per the config's data overrides and build a session.
pub fn open_session(config: &DashboardConfig) -> Result<DashboardSession, AppError> {
    let fixtures = Fixtures::load(&config.data)?;
    Ok(DashboardSession::new(SessionConfig::from(config), fixtures))
}
