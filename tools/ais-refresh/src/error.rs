//! Refresh failures. Every variant is fatal and leaves the output untouched.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("missing MYSHIPTRACKING_API_KEY or MYSHIPTRACKING_SECRET; populate your .env file")]
    MissingCredentials,

    #[error("invalid endpoint '{endpoint}': {source}")]
    Endpoint {
        endpoint: String,
        source: url::ParseError,
    },

    #[error("MyShipTracking API responded with {status}: {body}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unable to parse API response JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("API returned status {status}: {message}")]
    ApiStatus { status: String, message: String },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
