//! MyShipTracking port-vessels request.

use reqwest::header::ACCEPT;
use reqwest::{Client, Request};
use serde::Deserialize;
use url::Url;

use crate::env::{AuthMode, Settings};
use crate::error::RefreshError;

/// Raw API envelope. Only `data` is required to be an array, and even
/// that is tolerated when absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiPayload {
    pub status: Option<String>,
    pub message: Option<String>,
    pub timestamp: Option<String>,
    pub data: Option<serde_json::Value>,
}

/// Endpoint with `port`, `format=json` and, in query mode, the credentials.
pub fn request_url(settings: &Settings) -> Result<Url, RefreshError> {
    let mut url = Url::parse(&settings.endpoint).map_err(|source| RefreshError::Endpoint {
        endpoint: settings.endpoint.clone(),
        source,
    })?;

    let has_port = url.query_pairs().any(|(key, _)| key == "port");
    let mut query = url.query_pairs_mut();
    if !has_port && !settings.port.is_empty() {
        query.append_pair("port", &settings.port);
    }
    query.append_pair("format", "json");
    if settings.auth_mode == AuthMode::Query {
        query
            .append_pair("key", &settings.api_key)
            .append_pair("secret", &settings.secret);
    }
    drop(query);
    Ok(url)
}

pub fn build_request(client: &Client, settings: &Settings) -> Result<Request, RefreshError> {
    let mut builder = client
        .get(request_url(settings)?)
        .header(ACCEPT, "application/json");
    if settings.auth_mode == AuthMode::Header {
        builder = builder
            .header("X-API-KEY", &settings.api_key)
            .header("X-API-SECRET", &settings.secret);
    }
    Ok(builder.build()?)
}

/// Fetch and decode the payload, rejecting non-2xx responses and
/// API-level failures.
pub async fn fetch(client: &Client, settings: &Settings) -> Result<ApiPayload, RefreshError> {
    let response = client.execute(build_request(client, settings)?).await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(RefreshError::Http {
            status: status.as_u16(),
            body,
        });
    }
    check_payload(serde_json::from_str(&body)?)
}

/// An explicit `status` other than `"success"` is a failure.
pub fn check_payload(payload: ApiPayload) -> Result<ApiPayload, RefreshError> {
    match payload.status.as_deref() {
        Some(status) if !status.is_empty() && status != "success" => {
            Err(RefreshError::ApiStatus {
                status: status.to_string(),
                message: payload
                    .message
                    .clone()
                    .unwrap_or_else(|| "Unknown error".to_string()),
            })
        }
        _ => Ok(payload),
    }
}
