//! Error types for loading fixture data.

/// Errors that can occur while loading a fixture file.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// Failed to read the fixture file from disk.
    #[error("failed to read {name} fixture: {source}")]
    Io {
        /// Which fixture was being read.
        name: &'static str,
        source: std::io::Error,
    },

    /// The fixture content is not valid JSON for its record type.
    #[error("failed to parse {name} fixture: {source}")]
    Json {
        /// Which fixture was being parsed.
        name: &'static str,
        source: serde_json::Error,
    },
}
