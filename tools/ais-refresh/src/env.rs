//! Settings from the process environment and an optional `.env` file.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use tracing::warn;

use crate::error::RefreshError;

pub const DEFAULT_PORT: &str = "Alexandria";
pub const DEFAULT_ENDPOINT: &str = "https://api.myshiptracking.com/v1/ports/vessels";

/// Where credentials go on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// `X-API-KEY` / `X-API-SECRET` headers.
    Header,
    /// `key` / `secret` query parameters.
    Query,
}

impl AuthMode {
    /// `"header"` selects headers; anything else uses the query string.
    pub fn parse(value: &str) -> Self {
        if value == "header" {
            AuthMode::Header
        } else {
            AuthMode::Query
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub secret: String,
    pub port: String,
    pub endpoint: String,
    pub auth_mode: AuthMode,
}

impl Settings {
    /// Resolve each setting from `process` first, then `file`.
    ///
    /// # Errors
    ///
    /// [`RefreshError::MissingCredentials`] if the key or secret is unset or empty.
    pub fn resolve(
        process: impl Fn(&str) -> Option<String>,
        file: &HashMap<String, String>,
    ) -> Result<Self, RefreshError> {
        let get = |key: &str| process(key).or_else(|| file.get(key).cloned());

        let api_key = get("MYSHIPTRACKING_API_KEY").filter(|v| !v.is_empty());
        let secret = get("MYSHIPTRACKING_SECRET").filter(|v| !v.is_empty());
        let (Some(api_key), Some(secret)) = (api_key, secret) else {
            return Err(RefreshError::MissingCredentials);
        };

        Ok(Self {
            api_key,
            secret,
            port: get("MYSHIPTRACKING_PORT").unwrap_or_else(|| DEFAULT_PORT.to_string()),
            endpoint: get("MYSHIPTRACKING_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            auth_mode: get("MYSHIPTRACKING_AUTH_MODE")
                .map_or(AuthMode::Query, |mode| AuthMode::parse(&mode)),
        })
    }
}

/// `KEY=VALUE` lines; blank lines and `#` comments are skipped and the
/// value keeps any further `=`.
pub fn parse_env(raw: &str) -> HashMap<String, String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_once('=').unwrap_or((line, ""));
            let key = key.trim();
            (!key.is_empty()).then(|| (key.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Read a `.env` file. A missing file is an empty map; other read errors
/// are logged and also yield an empty map.
pub async fn load_env_file(path: &Path) -> HashMap<String, String> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => parse_env(&raw),
        Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
        Err(err) => {
            warn!(path = %path.display(), %err, "unable to read .env file");
            HashMap::new()
        }
    }
}
