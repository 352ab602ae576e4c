//! Host error type.

use harbor_core::config::ConfigError;
use harbor_core::error::FixtureError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown scenario '{key}'")]
    UnknownScenario { key: String },
}
